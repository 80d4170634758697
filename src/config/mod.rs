// src/config/mod.rs
//! Configuration: wire constants, transfer settings, and the mounted drive map.
//!
//! Precedence: defaults < config file < command line.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::FilesError;

/// Directory entries shown per page.
pub const PAGE_SIZE: usize = 8;
/// Largest chunk the transfer engine will read and transmit at once.
pub const CHUNK_MAX_SIZE: usize = 1024;
/// Chunk size used until the user changes it.
pub const CHUNK_DEFAULT_SIZE: usize = 256;
/// Inter-chunk delay used until the user changes it.
pub const CHUNK_DEFAULT_DELAY_MS: u64 = 100;
/// Longest inter-chunk delay the settings editor accepts.
pub const CHUNK_MAX_DELAY_MS: u64 = u16::MAX as u64;
/// Longest browse path, including the drive prefix.
pub const PATH_MAX_LEN: usize = 256;
/// Longest file name.
pub const FN_MAX_LEN: usize = 128;
/// Leading marker of folder names returned by a directory cursor.
pub const FOLDER_MARKER: char = '/';
/// Drive letter used when nothing else is mounted.
pub const DEFAULT_DRIVE: char = 'U';

const DEFAULT_OUTPUT: &str = "fileshuttle.out";

/// Extra metadata the user may ask to send along with a file.
///
/// Stored and edited, but not framed on the wire: a chunk stream carries
/// raw file bytes only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    pub file_name: bool,
    pub size: bool,
    pub checksum: bool,
}

/// Chunking parameters of the transfer engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSettings {
    chunk_size: usize,
    chunk_delay_ms: u64,
    pub options: SendOptions,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_DEFAULT_SIZE,
            chunk_delay_ms: CHUNK_DEFAULT_DELAY_MS,
            options: SendOptions::default(),
        }
    }
}

impl TransferSettings {
    /// Build settings, clamping the chunk size to [`CHUNK_MAX_SIZE`].
    pub fn new(chunk_size: usize, chunk_delay_ms: u64) -> Result<Self, FilesError> {
        let mut settings = Self::default();
        settings.set_chunk_size(chunk_size)?;
        settings.set_chunk_delay_ms(chunk_delay_ms)?;
        Ok(settings)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_delay_ms(&self) -> u64 {
        self.chunk_delay_ms
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    /// Set the chunk size. Zero is rejected; anything above the maximum is
    /// clamped. Returns the value actually stored.
    pub fn set_chunk_size(&mut self, size: usize) -> Result<usize, FilesError> {
        if size == 0 {
            return Err(FilesError::InvalidSetting {
                field: "chunk size",
                value: size.to_string(),
            });
        }
        self.chunk_size = size.min(CHUNK_MAX_SIZE);
        Ok(self.chunk_size)
    }

    /// Set the inter-chunk delay in milliseconds.
    pub fn set_chunk_delay_ms(&mut self, delay_ms: u64) -> Result<(), FilesError> {
        if delay_ms == 0 || delay_ms > CHUNK_MAX_DELAY_MS {
            return Err(FilesError::InvalidSetting {
                field: "chunk delay",
                value: delay_ms.to_string(),
            });
        }
        self.chunk_delay_ms = delay_ms;
        Ok(())
    }
}

/// `[transfer]` table of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSection {
    pub chunk_size: usize,
    pub chunk_delay_ms: u64,
    pub send_file_name: bool,
    pub send_size: bool,
    pub send_checksum: bool,
}

impl Default for TransferSection {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_DEFAULT_SIZE,
            chunk_delay_ms: CHUNK_DEFAULT_DELAY_MS,
            send_file_name: false,
            send_size: false,
            send_checksum: false,
        }
    }
}

/// On-disk config file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Drive letter -> host directory
    pub drives: BTreeMap<String, PathBuf>,
    pub transfer: TransferSection,
    /// Where transmitted chunks are appended
    pub output: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config file")
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub drives: Vec<(char, PathBuf)>,
    pub chunk_size: Option<usize>,
    pub chunk_delay_ms: Option<u64>,
    pub output: Option<PathBuf>,
}

/// Fully resolved configuration after all layers merge.
#[derive(Debug, Clone)]
pub struct Config {
    pub drives: BTreeMap<char, PathBuf>,
    pub transfer: TransferSettings,
    pub output: PathBuf,
}

impl Config {
    /// Merge defaults, the optional config file and the command-line overrides.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file_config = match file {
            Some(path) => {
                debug!("loading config from {}", path.display());
                FileConfig::read(path)?
            }
            None => FileConfig::default(),
        };
        Self::resolve(file_config, overrides)
    }

    pub fn resolve(file_config: FileConfig, overrides: Overrides) -> Result<Self> {
        let mut drives = BTreeMap::new();
        for (letter, dir) in file_config.drives {
            drives.insert(parse_drive_letter(&letter)?, dir);
        }
        for (letter, dir) in overrides.drives {
            drives.insert(letter.to_ascii_uppercase(), dir);
        }
        if drives.is_empty() {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            drives.insert(DEFAULT_DRIVE, cwd);
        }

        let section = file_config.transfer;
        let mut transfer = TransferSettings::new(
            overrides.chunk_size.unwrap_or(section.chunk_size),
            overrides.chunk_delay_ms.unwrap_or(section.chunk_delay_ms),
        )?;
        transfer.options = SendOptions {
            file_name: section.send_file_name,
            size: section.send_size,
            checksum: section.send_checksum,
        };

        let output = overrides
            .output
            .or(file_config.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        info!(
            "config resolved: {} drive(s), chunk {} B every {} ms, output {}",
            drives.len(),
            transfer.chunk_size(),
            transfer.chunk_delay_ms(),
            output.display()
        );

        Ok(Self {
            drives,
            transfer,
            output,
        })
    }
}

fn parse_drive_letter(text: &str) -> Result<char, FilesError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(FilesError::Config {
            message: format!("drive name must be a single letter, got {text:?}"),
        }),
    }
}

/// Parse a `L=DIR` drive mapping as given on the command line.
pub fn parse_drive_spec(spec: &str) -> Result<(char, PathBuf), FilesError> {
    let (letter, dir) = spec.split_once('=').ok_or_else(|| FilesError::Config {
        message: format!("expected L=DIR, got {spec:?}"),
    })?;
    if dir.is_empty() {
        return Err(FilesError::Config {
            message: format!("missing directory for drive {letter}"),
        });
    }
    Ok((parse_drive_letter(letter)?, PathBuf::from(dir)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_is_clamped_and_zero_rejected() {
        let mut settings = TransferSettings::default();
        assert_eq!(settings.set_chunk_size(5000).unwrap(), CHUNK_MAX_SIZE);
        assert_eq!(settings.chunk_size(), CHUNK_MAX_SIZE);
        assert!(settings.set_chunk_size(0).is_err());
        assert_eq!(settings.chunk_size(), CHUNK_MAX_SIZE);
    }

    #[test]
    fn chunk_delay_bounds() {
        let mut settings = TransferSettings::default();
        assert!(settings.set_chunk_delay_ms(0).is_err());
        assert!(settings.set_chunk_delay_ms(CHUNK_MAX_DELAY_MS + 1).is_err());
        settings.set_chunk_delay_ms(20).unwrap();
        assert_eq!(settings.chunk_delay(), Duration::from_millis(20));
    }

    #[test]
    fn command_line_beats_config_file() {
        let file = FileConfig::from_toml(
            r#"
            output = "from-file.bin"

            [drives]
            u = "/srv/u"
            S = "/srv/s"

            [transfer]
            chunk_size = 64
            chunk_delay_ms = 10
            send_size = true
            "#,
        )
        .unwrap();

        let overrides = Overrides {
            drives: vec![('U', PathBuf::from("/mnt/usb"))],
            chunk_delay_ms: Some(50),
            ..Overrides::default()
        };
        let config = Config::resolve(file, overrides).unwrap();

        assert_eq!(config.drives[&'U'], PathBuf::from("/mnt/usb"));
        assert_eq!(config.drives[&'S'], PathBuf::from("/srv/s"));
        assert_eq!(config.transfer.chunk_size(), 64);
        assert_eq!(config.transfer.chunk_delay_ms(), 50);
        assert!(config.transfer.options.size);
        assert!(!config.transfer.options.file_name);
        assert_eq!(config.output, PathBuf::from("from-file.bin"));
    }

    #[test]
    fn bad_drive_names_are_rejected() {
        assert!(parse_drive_spec("UU=/tmp").is_err());
        assert!(parse_drive_spec("U").is_err());
        assert!(parse_drive_spec("U=").is_err());
        assert_eq!(
            parse_drive_spec("s=/tmp").unwrap(),
            ('S', PathBuf::from("/tmp"))
        );
    }
}
