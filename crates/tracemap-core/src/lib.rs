// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the tracemap stack trace translator.
//!
//! This crate provides the I/O-free half of the pipeline:
//! - Parsing free-text minified stack traces into structured frames
//! - The frame and resolution data model
//! - Canonical rendering of resolved and unresolved frames
//!
//! Map discovery, source map decoding, and position lookup live in
//! `tracemap-symbolicate`.

pub mod error;
pub mod extract;
pub mod format;
pub mod frame;

pub use error::{Result, TraceError};
pub use extract::{extract_frames, parse_frame_line, ParsedTrace};
pub use format::{format_frame, FAILED_FRAME_LINE};
pub use frame::{Resolution, ResolvedFrame, StackFrame};
