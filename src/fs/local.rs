// src/fs/local.rs
//! Adapter that mounts host directories as drive letters.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, Read, Seek},
    path::PathBuf,
    vec,
};

use log::debug;

use super::adapter::{split_drive, DirCursor, FileHandle, FileSystem};
use crate::config::FOLDER_MARKER;

/// Host directories exposed as drives `A:` .. `Z:`.
#[derive(Debug, Clone, Default)]
pub struct LocalDrives {
    drives: BTreeMap<char, PathBuf>,
}

impl LocalDrives {
    pub fn new(drives: BTreeMap<char, PathBuf>) -> Self {
        Self { drives }
    }

    /// Mount a single directory.
    pub fn single(letter: char, root: impl Into<PathBuf>) -> Self {
        let mut drives = BTreeMap::new();
        drives.insert(letter.to_ascii_uppercase(), root.into());
        Self { drives }
    }

    /// Map a drive path onto the host filesystem.
    ///
    /// `..` components are refused so a path can never leave its drive.
    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let (letter, rest) = split_drive(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("no drive in {path:?}"))
        })?;
        let root = self.drives.get(&letter).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("drive {letter}: not mounted"))
        })?;

        let mut host = root.clone();
        for component in rest.split('/') {
            match component {
                "" | "." => continue,
                ".." => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "path contains parent directory (..)",
                    ));
                }
                c if c.contains('\0') => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "path contains null byte",
                    ));
                }
                c => host.push(c),
            }
        }
        Ok(host)
    }
}

impl FileSystem for LocalDrives {
    type File = LocalFile;
    type Dir = LocalDir;

    fn open(&self, path: &str) -> io::Result<LocalFile> {
        let host = self.resolve(path)?;
        if host.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{path} is a directory"),
            ));
        }
        debug!("open {path} -> {}", host.display());
        Ok(LocalFile {
            file: File::open(host)?,
        })
    }

    fn open_dir(&self, path: &str) -> io::Result<LocalDir> {
        let host = self.resolve(path)?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&host)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                names.push(format!("{FOLDER_MARKER}{name}"));
            } else {
                names.push(name);
            }
        }
        // Host order is unspecified; pages are rebuilt by re-reading, so it must be stable
        names.sort_by_key(|n| n.trim_start_matches(FOLDER_MARKER).to_lowercase());
        Ok(LocalDir {
            names: names.into_iter(),
        })
    }

    fn volumes(&self) -> Vec<char> {
        self.drives.keys().copied().collect()
    }

    fn remove(&self, path: &str) -> io::Result<()> {
        let host = self.resolve(path)?;
        debug!("remove {path} -> {}", host.display());
        fs::remove_file(host)
    }
}

/// File opened through [`LocalDrives`].
#[derive(Debug)]
pub struct LocalFile {
    file: File,
}

impl FileHandle for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.file.stream_position()
    }

    fn size(&mut self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}

/// Directory snapshot taken when the cursor is opened.
#[derive(Debug)]
pub struct LocalDir {
    names: vec::IntoIter<String>,
}

impl DirCursor for LocalDir {
    fn read_entry(&mut self) -> io::Result<String> {
        Ok(self.names.next().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn drives() -> (TempDir, LocalDrives) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("Music")).unwrap();
        fs::write(dir.path().join("b.txt"), b"hello").unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        let drives = LocalDrives::single('u', dir.path());
        (dir, drives)
    }

    #[test]
    fn lists_folders_with_marker_in_stable_order() {
        let (_dir, drives) = drives();
        let mut cursor = drives.open_dir("U:").unwrap();
        assert_eq!(cursor.read_entry().unwrap(), "a.txt");
        assert_eq!(cursor.read_entry().unwrap(), "b.txt");
        assert_eq!(cursor.read_entry().unwrap(), "/Music");
        assert_eq!(cursor.read_entry().unwrap(), "");
        assert_eq!(cursor.read_entry().unwrap(), "");
    }

    #[test]
    fn parent_components_are_refused() {
        let (_dir, drives) = drives();
        let err = drives.open("U:/../etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(drives.open_dir("S:/").is_err());
    }

    #[test]
    fn read_is_short_only_at_eof() {
        let (_dir, drives) = drives();
        let mut file = drives.open("U:/b.txt").unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(file.read(&mut buf).unwrap(), 4);
        assert_eq!(file.tell().unwrap(), 4);
        assert_eq!(file.read(&mut buf).unwrap(), 1);
        assert_eq!(file.read(&mut buf).unwrap(), 0);
        assert_eq!(file.size().unwrap(), 5);
    }

    #[test]
    fn directories_do_not_open_as_files() {
        let (_dir, drives) = drives();
        assert!(drives.open("U:/Music").is_err());
        assert_eq!(drives.volumes(), vec!['U']);
    }
}
