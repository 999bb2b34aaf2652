// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for stack trace processing.

use thiserror::Error;

/// Errors that can occur while parsing a stack trace.
#[derive(Debug, Error)]
pub enum TraceError {
	#[error("no stack frames recognized in input")]
	EmptyTrace,
}

/// Result type for stack trace processing.
pub type Result<T> = std::result::Result<T, TraceError>;
