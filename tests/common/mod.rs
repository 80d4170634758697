#![allow(dead_code)]

use std::fs;

use fileshuttle::fs::LocalDrives;
use tempfile::TempDir;

pub fn setup_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// A `U:` drive holding `count` files named `f00`, `f01`, ...
pub fn drive_with_files(count: usize) -> (TempDir, LocalDrives) {
    let dir = setup_temp_dir();
    for i in 0..count {
        fs::write(dir.path().join(format!("f{i:02}")), [i as u8]).expect("write file");
    }
    let drives = LocalDrives::single('U', dir.path());
    (dir, drives)
}

/// Deterministic test payload.
pub fn create_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}
