// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map symbolication engine for tracemap.
//!
//! This crate provides:
//! - Source Map v3 parsing and Base64 VLQ mappings decoding
//! - Recursive map discovery with a lazy per-basename decoder cache
//! - Per-frame position resolution with graceful degradation
//! - The pipeline driver that translates a whole captured trace
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tracemap_symbolicate::{MapRegistry, TraceTranslator};
//!
//! let registry = MapRegistry::new(Path::new("build/")).unwrap();
//! let mut translator = TraceTranslator::new(registry);
//!
//! let trace = "TypeError x is not a function\n    at t (bundle.js:1:100)\n";
//! for line in translator.translate(trace).unwrap() {
//! 	println!("{line}");
//! }
//! ```

pub mod error;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod sourcemap;
pub mod vlq;

pub use error::{Result, SymbolicateError};
pub use pipeline::TraceTranslator;
pub use registry::MapRegistry;
pub use resolve::resolve_frame;
pub use sourcemap::{extract_context, OriginalPosition, PositionLookup, SourceMap};
pub use vlq::{decode_segment, parse_mappings, MappingIndex, MappingToken};
