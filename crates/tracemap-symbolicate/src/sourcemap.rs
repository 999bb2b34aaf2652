// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source Map v3 parsing and generated-to-original position lookup.

use serde::Deserialize;

use crate::error::{Result, SymbolicateError};
use crate::vlq::{parse_mappings, MappingIndex};

/// JSON envelope of a Source Map v3 file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceMap {
	version: u32,
	#[serde(default)]
	file: Option<String>,
	#[serde(default)]
	source_root: Option<String>,
	sources: Vec<String>,
	#[serde(default)]
	sources_content: Option<Vec<Option<String>>>,
	#[serde(default)]
	names: Vec<String>,
	mappings: String,
}

/// A loaded source map, ready to answer position queries.
#[derive(Debug, Clone)]
pub struct SourceMap {
	/// Generated file this map describes, when the map records it.
	pub file: Option<String>,
	source_root: Option<String>,
	sources: Vec<String>,
	sources_content: Vec<Option<String>>,
	names: Vec<String>,
	index: MappingIndex,
}

/// Result of a successful position lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
	/// Original source file path, joined with the map's `sourceRoot`.
	pub source: String,
	/// Line in the original source (1-indexed for display).
	pub line: u32,
	/// Column in the original source (0-indexed).
	pub column: u32,
	/// Original identifier at the mapped position, if recorded.
	pub name: Option<String>,
	/// Embedded content of the original source, if the map carries it.
	pub source_content: Option<String>,
}

/// Capability consumed by the resolver: translate a generated position into
/// an original one.
pub trait PositionLookup {
	/// Look up the original position for a generated line (1-indexed) and
	/// column (0-indexed). `Ok(None)` means the map has no mapping there.
	fn position_for(&self, line: u32, column: u32) -> Result<Option<OriginalPosition>>;
}

impl SourceMap {
	/// Parse a source map from raw JSON bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self> {
		let raw: RawSourceMap = serde_json::from_slice(data)?;

		if raw.version != 3 {
			return Err(SymbolicateError::InvalidSourceMapVersion(raw.version));
		}

		Ok(Self {
			file: raw.file,
			source_root: raw.source_root,
			sources: raw.sources,
			sources_content: raw.sources_content.unwrap_or_default(),
			names: raw.names,
			index: parse_mappings(&raw.mappings)?,
		})
	}

	/// Parse a source map from a JSON string.
	pub fn from_str(data: &str) -> Result<Self> {
		Self::from_bytes(data.as_bytes())
	}

	/// Join a source path with the map's `sourceRoot` when one is set.
	fn qualified_source(&self, source: &str) -> String {
		match self.source_root.as_deref() {
			Some(root) if !root.is_empty() => {
				format!("{}/{}", root.trim_end_matches('/'), source)
			}
			_ => source.to_string(),
		}
	}

	/// Whether any source has embedded content.
	pub fn has_sources_content(&self) -> bool {
		self.sources_content.iter().any(|c| c.is_some())
	}

	/// Number of original source files referenced by this map.
	pub fn source_count(&self) -> usize {
		self.sources.len()
	}

	/// Number of identifier names recorded by this map.
	pub fn name_count(&self) -> usize {
		self.names.len()
	}

	/// Number of decoded mapping tokens.
	pub fn mapping_count(&self) -> usize {
		self.index.len()
	}
}

impl PositionLookup for SourceMap {
	fn position_for(&self, line: u32, column: u32) -> Result<Option<OriginalPosition>> {
		// Stack traces report 1-indexed lines; the index is 0-indexed.
		let Some(token) = self.index.find(line.saturating_sub(1), column) else {
			return Ok(None);
		};

		let source = self
			.sources
			.get(token.source_index as usize)
			.ok_or(SymbolicateError::InvalidSourceIndex(token.source_index))?;

		let source_content = self
			.sources_content
			.get(token.source_index as usize)
			.and_then(|c| c.clone());

		let name = token
			.name_index
			.and_then(|idx| self.names.get(idx as usize).cloned());

		Ok(Some(OriginalPosition {
			source: self.qualified_source(source),
			line: token.original_line + 1,
			column: token.original_column,
			name,
			source_content,
		}))
	}
}

/// Extract source lines around `line` (1-indexed) from embedded content.
///
/// Returns (pre_context, context_line, post_context).
pub fn extract_context(
	source_content: &str,
	line: usize,
	context_lines: usize,
) -> (Vec<String>, String, Vec<String>) {
	let lines: Vec<&str> = source_content.lines().collect();
	let line_idx = line.saturating_sub(1);

	if line_idx >= lines.len() {
		return (Vec::new(), String::new(), Vec::new());
	}

	let pre_start = line_idx.saturating_sub(context_lines);
	let post_end = (line_idx + 1 + context_lines).min(lines.len());

	(
		lines[pre_start..line_idx].iter().map(|s| s.to_string()).collect(),
		lines[line_idx].to_string(),
		lines[line_idx + 1..post_end].iter().map(|s| s.to_string()).collect(),
	)
}
