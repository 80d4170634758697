// src/transfer/channel.rs
//! Inter-application message channel.
//!
//! Every chunk travels as one TEXT message. The receiver concatenates
//! messages until one shorter than the chunk size arrives.

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    config::{FN_MAX_LEN, PATH_MAX_LEN},
    error::{FilesError, Result},
};

/// Kind of an inter-app message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
}

/// Outgoing side of the channel.
pub trait MessageChannel {
    fn send(&mut self, kind: MessageKind, payload: &[u8]) -> io::Result<()>;
}

impl MessageChannel for Vec<Vec<u8>> {
    fn send(&mut self, _kind: MessageKind, payload: &[u8]) -> io::Result<()> {
        self.push(payload.to_vec());
        Ok(())
    }
}

/// Receiving application that appends every message to a host file.
#[derive(Debug)]
pub struct ChunkFileSink {
    path: PathBuf,
    file: File,
    messages: u64,
    bytes: u64,
}

impl ChunkFileSink {
    /// Create (or truncate) the output file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            path,
            file,
            messages: 0,
            bytes: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn messages(&self) -> u64 {
        self.messages
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl MessageChannel for ChunkFileSink {
    fn send(&mut self, _kind: MessageKind, payload: &[u8]) -> io::Result<()> {
        self.file.write_all(payload)?;
        self.file.flush()?;
        self.messages += 1;
        self.bytes += payload.len() as u64;
        debug!(
            "sink {}: message {} ({} B)",
            self.path.display(),
            self.messages,
            payload.len()
        );
        Ok(())
    }
}

/// Interpret an incoming TEXT message.
///
/// A message ending in `?` asks for the file named before the `?`. Anything
/// else is a chunk for some receiver and yields `Ok(None)`.
pub fn parse_request(payload: &[u8]) -> Result<Option<String>> {
    let Some((b'?', path)) = payload.split_last() else {
        return Ok(None);
    };
    let max = PATH_MAX_LEN + FN_MAX_LEN;
    if payload.len() > max {
        return Err(FilesError::PathTooLong {
            len: payload.len(),
            max,
        });
    }
    Ok(Some(String::from_utf8_lossy(path).into_owned()))
}
