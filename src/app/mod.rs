// src/app/mod.rs
//! Application module - applet state, notices and the send settings panel.

pub mod notice;
pub mod settings;
pub mod state;

// Re-export commonly used types
pub use notice::{Notice, NoticeLevel, Notices};
pub use settings::{SettingsField, SettingsPanel};
pub use state::{FilesApp, ListRow, MenuItem, Press, View};
