// src/fs/detection.rs
//! File type detection using magic numbers and extension-based fallback.

use std::{fmt, io};

use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

use super::adapter::{FileHandle, FileSystem};

/// Bytes sniffed from the start of a file.
const SNIFF_LEN: usize = 512;

/// High-level file categories.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FileCategory {
    Image,
    Audio,
    Video,
    Document,
    Archive,
    Binary,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Image => "Image",
            FileCategory::Audio => "Audio",
            FileCategory::Video => "Video",
            FileCategory::Document => "Document",
            FileCategory::Archive => "Archive",
            FileCategory::Binary => "Binary",
        };
        write!(f, "{}", s)
    }
}

/// Holds a detected MIME type + category.
#[derive(Debug, Clone, PartialEq)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Guess the type of a file from its name only. Used for list icons,
/// where opening every file on the page would be too slow.
pub fn guess_from_name(name: &str) -> FileType {
    let mime = MimeGuess::from_path(name).first_or_octet_stream().to_string();
    let category = category_for_mime(&mime);
    FileType { mime, category }
}

/// Detect the type of a file from its leading bytes, falling back to the name.
pub fn detect_from_bytes(name: &str, head: &[u8]) -> FileType {
    if let Some(kind) = Infer::new().get(head) {
        let mime = kind.mime_type().to_string();
        let category = match kind.matcher_type() {
            MatcherType::Image => FileCategory::Image,
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Video => FileCategory::Video,
            MatcherType::Archive => FileCategory::Archive,
            MatcherType::Doc | MatcherType::Text => FileCategory::Document,
            _ => FileCategory::Binary,
        };
        return FileType { mime, category };
    }
    guess_from_name(name)
}

/// Sniff a file through the adapter.
pub fn detect_file_type<F: FileSystem>(fs: &F, path: &str, name: &str) -> io::Result<FileType> {
    let mut file = fs.open(path)?;
    let mut head = [0u8; SNIFF_LEN];
    let n = file.read(&mut head)?;
    Ok(detect_from_bytes(name, &head[..n]))
}

fn category_for_mime(mime: &str) -> FileCategory {
    match mime.split('/').next().unwrap_or("application") {
        "image" => FileCategory::Image,
        "audio" => FileCategory::Audio,
        "video" => FileCategory::Video,
        "text" => FileCategory::Document,
        _ if mime.contains("zip") || mime.contains("tar") => FileCategory::Archive,
        _ if mime == "application/octet-stream" => FileCategory::Binary,
        _ => FileCategory::Document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_fallback() {
        assert_eq!(guess_from_name("notes.txt").category, FileCategory::Document);
        assert_eq!(guess_from_name("song.mp3").category, FileCategory::Audio);
        assert_eq!(guess_from_name("blob").category, FileCategory::Binary);
    }

    #[test]
    fn magic_number_beats_extension() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let found = detect_from_bytes("misnamed.txt", &png);
        assert_eq!(found.mime, "image/png");
        assert_eq!(found.category, FileCategory::Image);
    }
}
