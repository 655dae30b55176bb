//! Shared fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Directory holding the transcript fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Read a fixture as a string.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}: {e}"))
}

/// Copy a fixture into a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

/// Every `index="N"` value of an annotation file.
pub fn position_indices(xml: &str) -> Vec<usize> {
    xml.split("index=\"")
        .skip(1)
        .map(|rest| {
            let end = rest.find('"').expect("unterminated index attribute");
            rest[..end].parse().expect("index is not a number")
        })
        .collect()
}
