// src/fs/mod.rs
//! Filesystem module - adapter seam, host-backed drives, and type detection.

pub mod adapter;
pub mod detection;
pub mod local;

// Re-export commonly used types
pub use adapter::{
    drive_root, join_path, path_basename, path_parent, split_drive, DirCursor, DirEntry,
    FileHandle, FileSystem,
};
pub use detection::{detect_file_type, guess_from_name, FileCategory, FileType};
pub use local::LocalDrives;
