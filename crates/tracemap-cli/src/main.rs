// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `tracemap` — translate minified stack traces back to original sources.
//!
//! Reads a stack trace from standard input (or `--input`), resolves each
//! frame against the source maps found under the given path, and writes the
//! translated trace to standard output. Diagnostics go to standard error so
//! the output stays pipeable.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tracemap_core::TraceError;
use tracemap_symbolicate::{MapRegistry, TraceTranslator};

/// Exit code for input that contains no recognizable stack frames.
const EXIT_EMPTY_TRACE: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "tracemap", version, about = "Translate minified stack traces using source maps")]
struct Args {
	/// Source map file, or directory searched recursively for *.js.map files.
	map_path: PathBuf,

	/// Read the stack trace from a file instead of standard input.
	#[arg(long)]
	input: Option<PathBuf>,

	/// Print this many lines of original source around each resolved frame.
	#[arg(long, default_value_t = 0)]
	context: usize,
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();

	let trace = match &args.input {
		Some(path) => fs::read_to_string(path)
			.with_context(|| format!("failed to read trace from {}", path.display()))?,
		None => {
			let mut buffer = String::new();
			io::stdin()
				.read_to_string(&mut buffer)
				.context("failed to read trace from standard input")?;
			buffer
		}
	};

	let registry = MapRegistry::new(&args.map_path)
		.with_context(|| format!("failed to index source maps at {}", args.map_path.display()))?;
	info!(maps = registry.len(), "indexed source maps");

	let mut translator = TraceTranslator::new(registry).with_context_lines(args.context);
	let lines = match translator.translate(&trace) {
		Ok(lines) => lines,
		Err(err @ TraceError::EmptyTrace) => {
			error!("{err}");
			process::exit(EXIT_EMPTY_TRACE);
		}
	};

	let mut stdout = io::stdout().lock();
	for line in lines {
		writeln!(stdout, "{line}")?;
	}

	Ok(())
}
