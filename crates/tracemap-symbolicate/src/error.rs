// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for symbolication operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source map or looking up a position.
#[derive(Debug, Error)]
pub enum SymbolicateError {
	#[error("invalid source map JSON: {0}")]
	InvalidSourceMapJson(#[from] serde_json::Error),

	#[error("invalid source map version: expected 3, got {0}")]
	InvalidSourceMapVersion(u32),

	#[error("invalid VLQ character: {0:?}")]
	InvalidVlqChar(char),

	#[error("truncated VLQ segment: {0:?}")]
	TruncatedVlqSegment(String),

	#[error("invalid source index: {0}")]
	InvalidSourceIndex(u32),

	#[error("failed to load source map {path}: {source}")]
	MapLoad {
		path: PathBuf,
		#[source]
		source: Box<SymbolicateError>,
	},

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for symbolication operations.
pub type Result<T> = std::result::Result<T, SymbolicateError>;
