// src/fs/adapter.rs
//! Filesystem adapter seam and path helpers.
//!
//! Paths use drive-letter notation: `U:/music/song.mp3`. A bare `U:` is the
//! root of drive `U`, and the empty string stands for the list of drives.

use std::io;

use crate::config::FOLDER_MARKER;

/// An open file. Dropping the handle closes it.
pub trait FileHandle {
    /// Read up to `buf.len()` bytes.
    ///
    /// Implementations must fill the buffer unless end of file is reached,
    /// so a short count always means EOF and a read at EOF returns `Ok(0)`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Current read position in bytes.
    fn tell(&mut self) -> io::Result<u64>;

    /// Total file size in bytes.
    fn size(&mut self) -> io::Result<u64>;
}

/// Forward-only directory cursor. Dropping the cursor closes it.
pub trait DirCursor {
    /// Name of the next entry in native enumeration order.
    ///
    /// Folder names start with [`FOLDER_MARKER`]. Returns an empty string
    /// once the directory is exhausted.
    fn read_entry(&mut self) -> io::Result<String>;
}

/// Mounted drives the browser can walk and read from.
pub trait FileSystem {
    type File: FileHandle;
    type Dir: DirCursor;

    fn open(&self, path: &str) -> io::Result<Self::File>;
    fn open_dir(&self, path: &str) -> io::Result<Self::Dir>;
    /// Letters of every mounted drive.
    fn volumes(&self) -> Vec<char>;
    fn remove(&self, path: &str) -> io::Result<()>;
}

/// One raw directory entry, with the folder marker decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirEntry {
    Folder(String),
    File(String),
}

impl DirEntry {
    /// Decode a cursor name. `None` is the end-of-directory sentinel.
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else if let Some(name) = raw.strip_prefix(FOLDER_MARKER) {
            Some(DirEntry::Folder(name.to_string()))
        } else {
            Some(DirEntry::File(raw.to_string()))
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DirEntry::Folder(name) | DirEntry::File(name) => name,
        }
    }
}

/// Root path of a drive, e.g. `U:`.
pub fn drive_root(letter: char) -> String {
    format!("{letter}:")
}

/// Split `U:/a/b` into `('U', "/a/b")`.
pub fn split_drive(path: &str) -> Option<(char, &str)> {
    let mut chars = path.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_alphabetic() || chars.next()? != ':' {
        return None;
    }
    Some((letter.to_ascii_uppercase(), &path[2..]))
}

/// Append `name` to `dir` with exactly one separator.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Step one level up. A drive root goes back to the drive list (`""`).
pub fn path_parent(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}

/// Last component of `path`, ignoring trailing separators.
pub fn path_basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
