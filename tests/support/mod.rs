//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copies a fixture into a fresh temp directory so tests can modify it.
pub fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join(name);
    copy_dir(&fixture_path(name), &target);
    (temp, target)
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("Failed to create fixture copy");
    for entry in fs::read_dir(from).expect("Failed to read fixture") {
        let entry = entry.expect("Failed to read fixture entry");
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("Failed to copy fixture file");
        }
    }
}

pub fn shiftpack_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shiftpack"))
}
