// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map discovery and lazy decoder cache.
//!
//! The registry indexes map files under the basename of the generated file
//! they describe (`<generated basename>.map`) and parses each map at most
//! once, on first lookup. A run processes one bounded trace, so cached maps
//! live for the registry's lifetime and are never evicted.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SymbolicateError};
use crate::sourcemap::SourceMap;

/// Map files are discovered by this case-insensitive filename suffix.
const MAP_SUFFIX: &str = ".js.map";

/// Index of discovered source maps with a lazy per-basename decoder cache.
#[derive(Debug, Default)]
pub struct MapRegistry {
	/// Discovered map files keyed by their own basename.
	index: HashMap<String, PathBuf>,
	/// Load outcome keyed the same way; filled at most once per key.
	/// `None` records a failed load so the file is not re-read per frame.
	cache: HashMap<String, Option<Arc<SourceMap>>>,
	/// Number of map files read and parsed so far.
	loads: usize,
}

impl MapRegistry {
	/// Build a registry rooted at a single map file or a directory tree.
	pub fn new(root: &Path) -> Result<Self> {
		let mut registry = Self::default();
		registry.initialize(root)?;
		Ok(registry)
	}

	/// Reset all state and re-index from `root`.
	///
	/// A file root is indexed directly under its own basename. A directory
	/// root is walked recursively; files matching `*.js.map`
	/// (case-insensitive) are indexed by basename, later entries silently
	/// replacing earlier ones on collision. Unreadable entries are skipped.
	pub fn initialize(&mut self, root: &Path) -> Result<()> {
		self.index.clear();
		self.cache.clear();
		self.loads = 0;

		if fs::metadata(root)?.is_file() {
			if let Some(name) = root.file_name().and_then(|n| n.to_str()) {
				self.index.insert(name.to_string(), root.to_path_buf());
			}
			return Ok(());
		}

		for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
			if !entry.file_type().is_file() {
				continue;
			}
			let Some(name) = entry.file_name().to_str() else {
				continue;
			};
			if !name.to_ascii_lowercase().ends_with(MAP_SUFFIX) {
				continue;
			}
			if let Some(previous) = self
				.index
				.insert(name.to_string(), entry.path().to_path_buf())
			{
				debug!(
					basename = %name,
					replaced = %previous.display(),
					kept = %entry.path().display(),
					"duplicate map basename, keeping the later one"
				);
			}
		}

		debug!(maps = self.index.len(), root = %root.display(), "indexed source maps");
		Ok(())
	}

	/// Fetch the decoder for the map describing `generated_file`, loading and
	/// caching it on first use.
	///
	/// Returns `Ok(None)` when no map was discovered for the file; many
	/// frames (runtime internals, native code) legitimately have none. A
	/// load or parse failure surfaces as [`SymbolicateError::MapLoad`] on
	/// first use so the caller can degrade that one frame; the failure is
	/// then cached and later lookups for the same basename see `Ok(None)`
	/// without touching the file again.
	pub fn decoder_for(&mut self, generated_file: &str) -> Result<Option<Arc<SourceMap>>> {
		let key = format!("{}.map", basename(generated_file));

		if let Some(cached) = self.cache.get(&key) {
			return Ok(cached.clone());
		}

		let Some(path) = self.index.get(&key) else {
			debug!(file = %generated_file, "no source map discovered");
			return Ok(None);
		};

		let loaded = fs::read(path)
			.map_err(SymbolicateError::from)
			.and_then(|data| SourceMap::from_bytes(&data));

		match loaded {
			Ok(map) => {
				debug!(
					map = %path.display(),
					mappings = map.mapping_count(),
					sources = map.source_count(),
					"loaded source map"
				);
				self.loads += 1;
				let map = Arc::new(map);
				self.cache.insert(key, Some(map.clone()));
				Ok(Some(map))
			}
			Err(error) => {
				self.cache.insert(key, None);
				Err(SymbolicateError::MapLoad {
					path: path.clone(),
					source: Box::new(error),
				})
			}
		}
	}

	/// Number of discovered map files.
	pub fn len(&self) -> usize {
		self.index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// Number of maps actually read and parsed so far.
	pub fn load_count(&self) -> usize {
		self.loads
	}
}

/// Final path component of a generated file reference, tolerating URLs.
fn basename(file: &str) -> &str {
	file.rsplit(['/', '\\']).next().unwrap_or(file)
}
