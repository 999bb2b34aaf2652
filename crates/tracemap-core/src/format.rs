// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Canonical rendering of resolved and unresolved frames.
//!
//! The unresolved shape emits column before line (`file:column:line`) while
//! the resolved shape emits `source:line:column`. The two upstream trace
//! conventions disagree here and consumers parse the output, so the asymmetry
//! is kept as-is.

use crate::frame::{Resolution, ResolvedFrame, StackFrame};

/// Line emitted in place of a frame whose resolution failed unexpectedly.
pub const FAILED_FRAME_LINE: &str = "    at FAILED_TO_PARSE_LINE";

/// Render a frame resolution into one output line.
pub fn format_frame(resolution: &Resolution) -> String {
	match resolution {
		Resolution::Resolved(frame) => format_resolved(frame),
		Resolution::Unresolved(frame) => format_raw(frame),
	}
}

fn format_resolved(frame: &ResolvedFrame) -> String {
	format!(
		"    at {} ({}:{}:{})",
		frame.display_name, frame.source, frame.line, frame.column
	)
}

fn format_raw(frame: &StackFrame) -> String {
	match (&frame.file, frame.line, frame.column) {
		(Some(file), Some(line), Some(column)) => {
			format!("    at {} ({}:{}:{})", frame.method_name, file, column, line)
		}
		_ => format!("    at {}", frame.method_name),
	}
}
