// src/ui/widgets/file_list.rs
//! File browser list widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::{app::ListRow, fs::FileType, ui::icons::icon_for_row};

/// Render the browser list, or the file action menu with the file's type
/// in the bottom border.
pub fn render_file_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    rows: &[ListRow],
    file_info: Option<&FileType>,
    state: &mut ListState,
) {
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(format!("{} {}", icon_for_row(row), row.label())))
        .collect();

    let mut block = Block::default().borders(Borders::ALL).title(title.to_string());
    if let Some(info) = file_info {
        block = block.title_bottom(
            Line::styled(
                format!(" {} ({}) ", info.mime, info.category),
                Style::default().fg(Color::DarkGray),
            ),
        );
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}
