// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack trace text parsing.
//!
//! Turns the free-text trace captured from standard input into an ordered
//! sequence of [`StackFrame`]s. Recognizes the V8 `at name (file:line:col)`
//! shape, the Firefox/JavaScriptCore `name@file:line:col` shape, and native
//! frames that carry no source position.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, TraceError};
use crate::frame::StackFrame;

/// `at name (file:line:col)` or `at file:line:col`.
static V8_CALL_SITE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*at\s+(?:(?P<method>.+?)\s+)?\(?(?P<file>[^()\s]+):(?P<line>\d+):(?P<column>\d+)\)?\s*$")
		.unwrap()
});

/// `name@file:line:col` (name may be empty for anonymous functions).
static JSC_CALL_SITE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*(?P<method>[^@\s]*)@(?P<file>[^@\s]+):(?P<line>\d+):(?P<column>\d+)\s*$")
		.unwrap()
});

/// Native frames: `[native code] name` or `name@[native code]`.
static NATIVE_CALL_SITE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*(?:(?:at\s+)?\[native code\]\s+(?P<post>\S+)|(?P<pre>[^@\s]+)@\[native code\])\s*$")
		.unwrap()
});

/// A parsed stack trace: an optional message line above the frames, plus the
/// frames in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTrace {
	/// First non-blank line of the input when it is not itself a frame.
	pub header: Option<String>,
	/// Frames in the order they appear in the input.
	pub frames: Vec<StackFrame>,
}

/// Parse a full captured trace into frames.
///
/// Fails with [`TraceError::EmptyTrace`] when no line of the input is
/// recognizable as a stack frame; there is nothing to translate in that case.
pub fn extract_frames(input: &str) -> Result<ParsedTrace> {
	let mut frames = Vec::new();
	let mut header = None;
	let mut seen_nonblank = false;

	for line in input.lines() {
		let frame = parse_frame_line(line);

		if !seen_nonblank && !line.trim().is_empty() {
			seen_nonblank = true;
			if frame.is_none() {
				header = Some(line.trim().to_string());
			}
		}

		if let Some(frame) = frame {
			frames.push(frame);
		}
	}

	if frames.is_empty() {
		return Err(TraceError::EmptyTrace);
	}

	Ok(ParsedTrace { header, frames })
}

/// Parse a single line into a frame, if it looks like one.
pub fn parse_frame_line(line: &str) -> Option<StackFrame> {
	if let Some(caps) = NATIVE_CALL_SITE.captures(line) {
		let method = caps
			.name("post")
			.or_else(|| caps.name("pre"))
			.map(|m| m.as_str().to_string())
			.unwrap_or_default();
		return Some(StackFrame {
			file: None,
			method_name: method,
			line: None,
			column: None,
		});
	}

	let caps = V8_CALL_SITE
		.captures(line)
		.or_else(|| JSC_CALL_SITE.captures(line))?;

	Some(StackFrame {
		file: Some(caps["file"].to_string()),
		method_name: caps
			.name("method")
			.map(|m| m.as_str().to_string())
			.unwrap_or_default(),
		line: Some(parse_position(&caps["line"])),
		column: Some(parse_position(&caps["column"])),
	})
}

/// Digit-only position capture; values past `u32::MAX` clamp so the frame
/// keeps its file and stays renderable.
fn parse_position(digits: &str) -> u32 {
	digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_v8_frame_with_method() {
		let frame = parse_frame_line("    at t (bundle.js:1:100)").unwrap();
		assert_eq!(frame.file.as_deref(), Some("bundle.js"));
		assert_eq!(frame.method_name, "t");
		assert_eq!(frame.line, Some(1));
		assert_eq!(frame.column, Some(100));
	}

	#[test]
	fn test_parse_v8_frame_without_method() {
		let frame = parse_frame_line("    at bundle.js:12:4").unwrap();
		assert_eq!(frame.file.as_deref(), Some("bundle.js"));
		assert_eq!(frame.method_name, "");
		assert_eq!(frame.line, Some(12));
		assert_eq!(frame.column, Some(4));
	}

	#[test]
	fn test_parse_v8_frame_with_qualified_method() {
		let frame = parse_frame_line("    at new Foo (bundle.js:2:10)").unwrap();
		assert_eq!(frame.method_name, "new Foo");

		let frame = parse_frame_line("    at Object.<anonymous> (bundle.js:5:3)").unwrap();
		assert_eq!(frame.method_name, "Object.<anonymous>");
	}

	#[test]
	fn test_parse_jsc_frame() {
		let frame = parse_frame_line("onPress@main.jsbundle:1:4242").unwrap();
		assert_eq!(frame.file.as_deref(), Some("main.jsbundle"));
		assert_eq!(frame.method_name, "onPress");
		assert_eq!(frame.line, Some(1));
		assert_eq!(frame.column, Some(4242));
	}

	#[test]
	fn test_parse_jsc_anonymous_frame() {
		let frame = parse_frame_line("@main.jsbundle:1:10").unwrap();
		assert_eq!(frame.method_name, "");
		assert_eq!(frame.line, Some(1));
	}

	#[test]
	fn test_parse_native_frame() {
		let frame = parse_frame_line("[native code] value").unwrap();
		assert_eq!(frame.file, None);
		assert_eq!(frame.method_name, "value");
		assert_eq!(frame.line, None);
		assert_eq!(frame.column, None);

		let frame = parse_frame_line("forEach@[native code]").unwrap();
		assert_eq!(frame.method_name, "forEach");
		assert!(!frame.has_position());
	}

	#[test]
	fn test_parse_clamps_oversized_positions() {
		let frame = parse_frame_line("    at t (bundle.js:99999999999999999999:7)").unwrap();
		assert_eq!(frame.file.as_deref(), Some("bundle.js"));
		assert_eq!(frame.line, Some(u32::MAX));
		assert_eq!(frame.column, Some(7));
		assert!(frame.has_position());
	}

	#[test]
	fn test_parse_rejects_prose() {
		assert!(parse_frame_line("TypeError x is not a function").is_none());
		assert!(parse_frame_line("").is_none());
	}

	#[test]
	fn test_extract_header_and_frames() {
		let input = "TypeError x is not a function\n    at t (bundle.js:1:100)\n    at r (bundle.js:1:200)\n";
		let trace = extract_frames(input).unwrap();
		assert_eq!(trace.header.as_deref(), Some("TypeError x is not a function"));
		assert_eq!(trace.frames.len(), 2);
		assert_eq!(trace.frames[0].method_name, "t");
		assert_eq!(trace.frames[1].method_name, "r");
	}

	#[test]
	fn test_extract_no_header_when_first_line_is_a_frame() {
		let input = "    at t (bundle.js:1:100)\n";
		let trace = extract_frames(input).unwrap();
		assert_eq!(trace.header, None);
		assert_eq!(trace.frames.len(), 1);
	}

	#[test]
	fn test_extract_skips_leading_blank_lines() {
		let input = "\n\nReferenceError boom\n    at bundle.js:3:7\n";
		let trace = extract_frames(input).unwrap();
		assert_eq!(trace.header.as_deref(), Some("ReferenceError boom"));
	}

	#[test]
	fn test_extract_empty_trace_is_an_error() {
		let err = extract_frames("nothing here\njust prose\n").unwrap_err();
		assert!(matches!(err, TraceError::EmptyTrace));
	}

	#[test]
	fn test_frames_preserve_input_order() {
		let input = "    at c (b.js:3:3)\n    at b (b.js:2:2)\n    at a (b.js:1:1)\n";
		let trace = extract_frames(input).unwrap();
		let methods: Vec<&str> = trace
			.frames
			.iter()
			.map(|f| f.method_name.as_str())
			.collect();
		assert_eq!(methods, vec!["c", "b", "a"]);
	}

	mod properties {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn parse_never_panics(line in ".*") {
				let _ = parse_frame_line(&line);
			}

			#[test]
			fn frame_count_bounded_by_line_count(input in "[ -~\n]*") {
				if let Ok(trace) = extract_frames(&input) {
					prop_assert!(trace.frames.len() <= input.lines().count());
				}
			}
		}
	}
}
