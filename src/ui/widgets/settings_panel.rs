// src/ui/widgets/settings_panel.rs
//! Send settings popup drawn over the browser window.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::{
    app::{SettingsField, SettingsPanel},
    config::TransferSettings,
};

/// Center a fixed-height popup inside `area`.
fn popup_area(area: Rect, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

pub fn render_settings_panel(
    f: &mut Frame<'_>,
    area: Rect,
    panel: &SettingsPanel,
    settings: &TransferSettings,
) {
    let items: Vec<ListItem> = SettingsField::ALL
        .iter()
        .map(|&field| {
            let text = if field.is_toggle() {
                let mark = if SettingsPanel::is_checked(field, settings) { "x" } else { " " };
                format!("[{mark}] {}", field.label())
            } else {
                let unit = if field == SettingsField::ChunkDelay { " ms" } else { " B" };
                let cursor = if panel.editing() == Some(field) { "_" } else { "" };
                format!("{}: {}{cursor}{unit}", field.label(), panel.text(field))
            };
            let style = if panel.editing() == Some(field) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let popup = popup_area(area, SettingsField::ALL.len() as u16 + 2);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Send settings"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    state.select(Some(panel.selected));
    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}
