//! Error types for browsing and transfers.
//!
//! Every variant is local and non-fatal. The `Display` text is what the
//! applet shows in its notice line, so keep it short.

use std::io;

use thiserror::Error;

/// Errors raised by the pager, the transfer engine and the applet actions.
#[derive(Debug, Error)]
pub enum FilesError {
    /// Directory could not be opened, or its cursor ran out while skipping.
    #[error("Can not read the path {path}")]
    DirectoryUnreadable { path: String },

    /// File to send could not be opened.
    #[error("Can not open {path}")]
    FileOpenError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// First chunk of a send could not be read.
    #[error("Can not send the file {path}")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A send was requested while another one is running.
    #[error("File sending in progress")]
    TransferBusy,

    /// Path (or path + file name) exceeds the configured bound.
    #[error("Can not send file: too long path ({len} > {max})")]
    PathTooLong { len: usize, max: usize },

    /// Removing the selected file failed.
    #[error("Can not delete {name}")]
    DeleteFailed {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A running transfer stopped because a later chunk failed.
    #[error("Can not send the file: {reason}")]
    SendAborted { reason: String },

    /// A settings field was given a value it cannot hold.
    #[error("Invalid {field}: {value}")]
    InvalidSetting { field: &'static str, value: String },

    /// Config file or command-line configuration problem.
    #[error("config error: {message}")]
    Config { message: String },
}

impl FilesError {
    /// Returns true if the error belongs to the transfer engine.
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            FilesError::FileOpenError { .. }
                | FilesError::ReadError { .. }
                | FilesError::TransferBusy
                | FilesError::SendAborted { .. }
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FilesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_notice_text() {
        let err = FilesError::DirectoryUnreadable {
            path: "U:/gone".into(),
        };
        assert_eq!(err.to_string(), "Can not read the path U:/gone");
        assert_eq!(FilesError::TransferBusy.to_string(), "File sending in progress");
    }

    #[test]
    fn transfer_errors_are_classified() {
        assert!(FilesError::TransferBusy.is_transfer());
        assert!(
            FilesError::SendAborted {
                reason: "eof".into()
            }
            .is_transfer()
        );
        assert!(!FilesError::PathTooLong { len: 300, max: 256 }.is_transfer());
    }
}
