// src/ui/widgets/mod.rs
//! Custom widgets for the file applet UI.

pub mod file_list;
pub mod settings_panel;
pub mod shortcut;
pub mod status_line;

// Re-export widget rendering functions
pub use file_list::render_file_list;
pub use settings_panel::render_settings_panel;
pub use shortcut::render_shortcut;
pub use status_line::render_status_line;
