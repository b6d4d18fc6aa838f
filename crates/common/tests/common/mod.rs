//! Shared test utilities for repo integration tests
#![allow(dead_code)]

use common::repo::BasePath;
use tempfile::TempDir;

/// Set up an empty repository root in a temporary directory
pub fn setup_base_path() -> (BasePath, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let base = BasePath::new(temp_dir.path());
    (base, temp_dir)
}
