// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Base64 VLQ decoding for source map `mappings` payloads.
//!
//! The mappings string encodes one group per generated line (separated by
//! `;`), each group holding comma-separated segments of 1, 4, or 5 delta
//! encoded values. Decoding resolves the deltas into absolute positions and
//! builds a per-line index for column lookup.

use crate::error::{Result, SymbolicateError};

/// Reverse lookup table from ASCII byte to 6-bit Base64 value (-1 = invalid).
const B64_REVERSE: [i8; 128] = {
	let alphabet = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
	let mut table = [-1i8; 128];
	let mut i = 0;
	while i < alphabet.len() {
		table[alphabet[i] as usize] = i as i8;
		i += 1;
	}
	table
};

/// Continuation flag on the 6th bit of each digit.
const VLQ_CONTINUATION: i64 = 0b100000;
/// Payload mask for the low 5 bits of each digit.
const VLQ_MASK: i64 = 0b011111;

fn digit_value(byte: u8) -> Result<i64> {
	let value = if byte < 128 { B64_REVERSE[byte as usize] } else { -1 };
	if value < 0 {
		return Err(SymbolicateError::InvalidVlqChar(byte as char));
	}
	Ok(value as i64)
}

/// Decode one comma-separated segment into its (up to 5) signed values.
///
/// Returns the decoded values in order: generated column delta, then
/// optionally source index, original line, original column, and name index
/// deltas.
pub fn decode_segment(segment: &str) -> Result<Vec<i64>> {
	let mut values = Vec::with_capacity(5);
	let mut accum = 0i64;
	let mut shift = 0u32;

	for byte in segment.bytes() {
		let digit = digit_value(byte)?;
		accum |= (digit & VLQ_MASK) << shift;

		if digit & VLQ_CONTINUATION != 0 {
			shift += 5;
			continue;
		}

		// Low bit carries the sign; the remaining bits carry the magnitude.
		let magnitude = accum >> 1;
		values.push(if accum & 1 != 0 { -magnitude } else { magnitude });
		accum = 0;
		shift = 0;
	}

	if shift != 0 {
		return Err(SymbolicateError::TruncatedVlqSegment(segment.to_string()));
	}

	Ok(values)
}

/// One decoded mapping: a generated column and the original position it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingToken {
	/// Column in the generated file (0-indexed).
	pub generated_column: u32,
	/// Index into the map's `sources` array.
	pub source_index: u32,
	/// Line in the original file (0-indexed).
	pub original_line: u32,
	/// Column in the original file (0-indexed).
	pub original_column: u32,
	/// Optional index into the map's `names` array.
	pub name_index: Option<u32>,
}

/// Decoded mappings indexed by generated line for position lookup.
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
	/// Outer index is the generated line; inner tokens sorted by column.
	lines: Vec<Vec<MappingToken>>,
	token_count: usize,
}

impl MappingIndex {
	/// Find the mapping for a generated position: the token with the largest
	/// column at or before `column` on `line` (both 0-indexed). Positions
	/// before the first token on a line have no mapping.
	pub fn find(&self, line: u32, column: u32) -> Option<&MappingToken> {
		let tokens = self.lines.get(line as usize)?;
		let at_or_before = tokens.partition_point(|t| t.generated_column <= column);
		at_or_before.checked_sub(1).map(|i| &tokens[i])
	}

	/// Total number of decoded mapping tokens.
	pub fn len(&self) -> usize {
		self.token_count
	}

	pub fn is_empty(&self) -> bool {
		self.token_count == 0
	}
}

/// Running absolute values for the delta-encoded segment fields.
#[derive(Default)]
struct DeltaState {
	source: i64,
	line: i64,
	column: i64,
	name: i64,
}

/// Decode a full `mappings` string into a line-indexed lookup structure.
pub fn parse_mappings(mappings: &str) -> Result<MappingIndex> {
	let mut lines = Vec::new();
	let mut token_count = 0usize;
	let mut state = DeltaState::default();

	for group in mappings.split(';') {
		let mut tokens = Vec::new();
		let mut generated_column = 0i64;

		for segment in group.split(',') {
			if segment.is_empty() {
				continue;
			}

			let values = decode_segment(segment)?;
			let Some(&column_delta) = values.first() else {
				continue;
			};
			generated_column += column_delta;

			// 1-value segments mark unmapped generated ranges; only segments
			// with source information participate in lookup.
			if values.len() < 4 {
				continue;
			}

			state.source += values[1];
			state.line += values[2];
			state.column += values[3];

			let name_index = values.get(4).map(|&delta| {
				state.name += delta;
				state.name as u32
			});

			tokens.push(MappingToken {
				generated_column: generated_column as u32,
				source_index: state.source as u32,
				original_line: state.line as u32,
				original_column: state.column as u32,
				name_index,
			});
		}

		// Lookup relies on column order within a line; bundlers emit segments
		// in order but the format does not require it.
		tokens.sort_by_key(|t| t.generated_column);
		token_count += tokens.len();
		lines.push(tokens);
	}

	Ok(MappingIndex { lines, token_count })
}
