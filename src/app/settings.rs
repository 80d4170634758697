// src/app/settings.rs
//! Send settings panel: option toggles and the two numeric chunk fields.

use log::debug;

use crate::{
    config::TransferSettings,
    error::{FilesError, Result},
};

/// Rows of the settings panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    SendFileName,
    SendSize,
    SendChecksum,
    ChunkSize,
    ChunkDelay,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::SendFileName,
        SettingsField::SendSize,
        SettingsField::SendChecksum,
        SettingsField::ChunkSize,
        SettingsField::ChunkDelay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::SendFileName => "Send file name",
            SettingsField::SendSize => "Send size",
            SettingsField::SendChecksum => "Send CRC",
            SettingsField::ChunkSize => "Chunk size",
            SettingsField::ChunkDelay => "Inter-chunk delay",
        }
    }

    pub fn is_toggle(self) -> bool {
        !matches!(self, SettingsField::ChunkSize | SettingsField::ChunkDelay)
    }
}

/// Open settings panel state.
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    pub selected: usize,
    chunk_size_text: String,
    chunk_delay_text: String,
    editing: Option<SettingsField>,
}

impl SettingsPanel {
    pub fn open(settings: &TransferSettings) -> Self {
        Self {
            selected: 0,
            chunk_size_text: settings.chunk_size().to_string(),
            chunk_delay_text: settings.chunk_delay_ms().to_string(),
            editing: None,
        }
    }

    pub fn selected_field(&self) -> SettingsField {
        SettingsField::ALL[self.selected.min(SettingsField::ALL.len() - 1)]
    }

    pub fn editing(&self) -> Option<SettingsField> {
        self.editing
    }

    pub fn next(&mut self) {
        if self.editing.is_none() {
            self.selected = (self.selected + 1) % SettingsField::ALL.len();
        }
    }

    pub fn previous(&mut self) {
        if self.editing.is_none() {
            let len = SettingsField::ALL.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Text of a numeric field as currently displayed.
    pub fn text(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::ChunkDelay => &self.chunk_delay_text,
            _ => &self.chunk_size_text,
        }
    }

    fn text_mut(&mut self, field: SettingsField) -> &mut String {
        match field {
            SettingsField::ChunkDelay => &mut self.chunk_delay_text,
            _ => &mut self.chunk_size_text,
        }
    }

    /// Current value of a toggle row.
    pub fn is_checked(field: SettingsField, settings: &TransferSettings) -> bool {
        match field {
            SettingsField::SendFileName => settings.options.file_name,
            SettingsField::SendSize => settings.options.size,
            SettingsField::SendChecksum => settings.options.checksum,
            _ => false,
        }
    }

    /// Enter on the selected row: flip a toggle, open a numeric editor, or
    /// confirm the one being edited.
    pub fn activate(&mut self, settings: &mut TransferSettings) -> Result<()> {
        let field = self.selected_field();
        if field.is_toggle() {
            let options = &mut settings.options;
            let flag = match field {
                SettingsField::SendFileName => &mut options.file_name,
                SettingsField::SendSize => &mut options.size,
                _ => &mut options.checksum,
            };
            *flag = !*flag;
            debug!("{} -> {}", field.label(), *flag);
            Ok(())
        } else if self.editing == Some(field) {
            self.confirm_edit(settings)
        } else {
            self.editing = Some(field);
            Ok(())
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.editing {
            if c.is_ascii_digit() {
                self.text_mut(field).push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.editing {
            self.text_mut(field).pop();
        }
    }

    /// Leave the editor, restoring each numeric field from its own setting.
    pub fn cancel_edit(&mut self, settings: &TransferSettings) {
        self.editing = None;
        self.chunk_size_text = settings.chunk_size().to_string();
        self.chunk_delay_text = settings.chunk_delay_ms().to_string();
    }

    /// Store the edited number. Chunk sizes above the maximum are clamped;
    /// unparsable or out-of-range text is rejected and the field restored.
    pub fn confirm_edit(&mut self, settings: &mut TransferSettings) -> Result<()> {
        let Some(field) = self.editing.take() else {
            return Ok(());
        };
        let text = self.text(field).to_string();
        let stored = match field {
            SettingsField::ChunkSize => text
                .parse::<usize>()
                .map_err(|_| invalid(field, &text))
                .and_then(|n| settings.set_chunk_size(n).map(|_| ())),
            _ => text
                .parse::<u64>()
                .map_err(|_| invalid(field, &text))
                .and_then(|n| settings.set_chunk_delay_ms(n)),
        };
        self.cancel_edit(settings);
        stored
    }
}

fn invalid(field: SettingsField, text: &str) -> FilesError {
    FilesError::InvalidSetting {
        field: field.label(),
        value: text.to_string(),
    }
}
