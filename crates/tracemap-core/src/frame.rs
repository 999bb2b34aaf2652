// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Frame types for minified and resolved stack traces.

use serde::{Deserialize, Serialize};

/// A single call site parsed from a minified stack trace.
///
/// Lines are 1-indexed (as displayed in stack traces), columns are 0-indexed
/// per the source map convention. Native frames carry a method name but no
/// file or position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
	/// Generated file the call site lives in, e.g. `bundle.js`.
	pub file: Option<String>,
	/// Mangled or original method name; empty when the trace line carried none.
	pub method_name: String,
	/// Line in the generated file (1-indexed).
	pub line: Option<u32>,
	/// Column in the generated file (0-indexed).
	pub column: Option<u32>,
}

impl StackFrame {
	/// Whether this frame carries a position that can be looked up in a map.
	pub fn has_position(&self) -> bool {
		self.file.is_some() && self.line.is_some() && self.column.is_some()
	}
}

/// A frame translated back to its original source location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFrame {
	/// Original identifier at the call site; empty when the mapping carried none.
	pub display_name: String,
	/// Original source file path.
	pub source: String,
	/// Line in the original source (1-indexed).
	pub line: u32,
	/// Column in the original source (0-indexed).
	pub column: u32,
	/// Original source content when the map embeds it.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source_content: Option<String>,
}

/// Outcome of resolving a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// The frame mapped back to an original position.
	Resolved(ResolvedFrame),
	/// No map or no mapping applied; the frame renders in its raw form.
	Unresolved(StackFrame),
}
