// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end tests for the `tracemap` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MAP_JSON: &str =
	r#"{"version": 3, "sources": ["src/a.js"], "names": ["foo"], "mappings": "oGASIA"}"#;

fn tracemap() -> Command {
	Command::cargo_bin("tracemap").unwrap()
}

#[test]
fn translates_a_trace_with_a_matching_map() {
	let dir = TempDir::new().unwrap();
	fs::write(dir.path().join("bundle.js.map"), MAP_JSON).unwrap();

	tracemap()
		.arg(dir.path())
		.write_stdin("TypeError x is not a function\n    at t (bundle.js:1:100)\n")
		.assert()
		.success()
		.stdout("TypeError x is not a function\n    at foo (src/a.js:10:4)\n");
}

#[test]
fn falls_back_to_raw_frames_without_a_map() {
	let dir = TempDir::new().unwrap();

	tracemap()
		.arg(dir.path())
		.write_stdin("TypeError x is not a function\n    at t (bundle.js:1:100)\n")
		.assert()
		.success()
		.stdout("TypeError x is not a function\n    at t (bundle.js:100:1)\n");
}

#[test]
fn native_frames_render_without_a_position() {
	let dir = TempDir::new().unwrap();
	fs::write(dir.path().join("bundle.js.map"), MAP_JSON).unwrap();

	tracemap()
		.arg(dir.path())
		.write_stdin("Error boom\n[native code] value\n")
		.assert()
		.success()
		.stdout("Error boom\n    at value\n");
}

#[test]
fn accepts_a_single_map_file_as_root() {
	let dir = TempDir::new().unwrap();
	let map_path = dir.path().join("bundle.js.map");
	fs::write(&map_path, MAP_JSON).unwrap();

	tracemap()
		.arg(&map_path)
		.write_stdin("    at t (bundle.js:1:100)\n")
		.assert()
		.success()
		.stdout("    at foo (src/a.js:10:4)\n");
}

#[test]
fn reads_the_trace_from_a_file_with_input() {
	let dir = TempDir::new().unwrap();
	fs::write(dir.path().join("bundle.js.map"), MAP_JSON).unwrap();
	let trace_path = dir.path().join("trace.txt");
	fs::write(&trace_path, "    at t (bundle.js:1:100)\n").unwrap();

	tracemap()
		.arg(dir.path())
		.arg("--input")
		.arg(&trace_path)
		.assert()
		.success()
		.stdout("    at foo (src/a.js:10:4)\n");
}

#[test]
fn fails_when_no_frames_are_recognized() {
	let dir = TempDir::new().unwrap();

	tracemap()
		.arg(dir.path())
		.write_stdin("just some prose\n")
		.assert()
		.code(2)
		.stderr(predicate::str::contains("no stack frames recognized"));
}

#[test]
fn fails_when_the_map_path_does_not_exist() {
	tracemap()
		.arg("/nonexistent/maps")
		.write_stdin("    at t (bundle.js:1:100)\n")
		.assert()
		.failure()
		.stderr(predicate::str::contains("failed to index source maps"));
}

#[test]
fn requires_the_map_path_argument() {
	tracemap().assert().failure();
}
