// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The end-to-end trace translation pipeline.
//!
//! Sequences extraction, per-frame resolution, and formatting over a whole
//! captured trace, preserving input order. A single frame's failure never
//! aborts the remaining frames; the user always gets a full trace, possibly
//! with some lines unresolved.

use tracing::warn;

use tracemap_core::{extract_frames, format_frame, Resolution, Result, FAILED_FRAME_LINE};

use crate::registry::MapRegistry;
use crate::resolve::resolve_frame;
use crate::sourcemap::extract_context;

/// Drives a full trace through the resolution pipeline.
#[derive(Debug)]
pub struct TraceTranslator {
	registry: MapRegistry,
	context_lines: usize,
}

impl TraceTranslator {
	pub fn new(registry: MapRegistry) -> Self {
		Self {
			registry,
			context_lines: 0,
		}
	}

	/// Print this many lines of original source around each resolved frame
	/// (when the map embeds source content). Zero disables context output.
	pub fn with_context_lines(mut self, context_lines: usize) -> Self {
		self.context_lines = context_lines;
		self
	}

	/// Translate a captured trace into output lines, in input order.
	///
	/// The first output line is the trace's message header when the input
	/// carried one that does not just repeat the first frame's file. Fails
	/// only when no frame at all is recognized.
	pub fn translate(&mut self, input: &str) -> Result<Vec<String>> {
		let trace = extract_frames(input)?;

		let mut out = Vec::with_capacity(trace.frames.len() + 1);

		if let Some(header) = &trace.header {
			let repeats_file = trace
				.frames
				.first()
				.and_then(|f| f.file.as_deref())
				.is_some_and(|file| header.contains(file));
			if !repeats_file {
				out.push(header.clone());
			}
		}

		for frame in &trace.frames {
			match resolve_frame(&mut self.registry, frame) {
				Ok(resolution) => {
					out.push(format_frame(&resolution));
					if self.context_lines > 0 {
						out.extend(self.render_context(&resolution));
					}
				}
				Err(error) => {
					warn!(%error, method = %frame.method_name, "frame resolution failed");
					out.push(FAILED_FRAME_LINE.to_string());
				}
			}
		}

		Ok(out)
	}

	/// Gutter-formatted source context for a resolved frame, if available.
	fn render_context(&self, resolution: &Resolution) -> Vec<String> {
		let Resolution::Resolved(frame) = resolution else {
			return Vec::new();
		};
		let Some(content) = &frame.source_content else {
			return Vec::new();
		};

		let (pre, focus, post) =
			extract_context(content, frame.line as usize, self.context_lines);
		if focus.is_empty() && pre.is_empty() && post.is_empty() {
			return Vec::new();
		}

		let first = frame.line as usize - pre.len();
		let last = frame.line as usize + post.len();
		let width = last.to_string().len();

		let mut lines = Vec::with_capacity(pre.len() + 1 + post.len());
		for (offset, text) in pre.iter().enumerate() {
			lines.push(format!("        {:>width$} | {}", first + offset, text));
		}
		lines.push(format!("      > {:>width$} | {}", frame.line, focus));
		for (offset, text) in post.iter().enumerate() {
			lines.push(format!(
				"        {:>width$} | {}",
				frame.line as usize + 1 + offset,
				text
			));
		}
		lines
	}
}
