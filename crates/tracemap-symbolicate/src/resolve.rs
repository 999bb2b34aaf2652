// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-frame position resolution.
//!
//! Translates one generated frame into its original position via the map
//! registry. Missing maps and unloadable maps degrade to the frame's raw
//! form; only lookup-time decoder failures propagate, so the driver can mark
//! that single frame as failed without aborting the run.

use tracing::{debug, warn};

use tracemap_core::{Resolution, ResolvedFrame, StackFrame};

use crate::error::Result;
use crate::registry::MapRegistry;
use crate::sourcemap::PositionLookup;

/// Resolve a single frame against the registry.
pub fn resolve_frame(registry: &mut MapRegistry, frame: &StackFrame) -> Result<Resolution> {
	// Native and positionless frames render as "at name" without any lookup.
	if !frame.has_position() {
		return Ok(Resolution::Unresolved(frame.clone()));
	}
	let (file, line, column) = (
		frame.file.as_deref().unwrap_or_default(),
		frame.line.unwrap_or_default(),
		frame.column.unwrap_or_default(),
	);

	let decoder = match registry.decoder_for(file) {
		Ok(Some(decoder)) => decoder,
		Ok(None) => return Ok(Resolution::Unresolved(frame.clone())),
		Err(error) => {
			// An unloadable map is treated the same as no map at all.
			warn!(file = %file, %error, "failed to load source map, leaving frame raw");
			return Ok(Resolution::Unresolved(frame.clone()));
		}
	};

	match decoder.position_for(line, column)? {
		Some(position) => Ok(Resolution::Resolved(ResolvedFrame {
			display_name: position.name.unwrap_or_default(),
			source: position.source,
			line: position.line,
			column: position.column,
			source_content: position.source_content,
		})),
		None => {
			debug!(file = %file, line, column, "no mapping for position");
			Ok(Resolution::Unresolved(frame.clone()))
		}
	}
}
