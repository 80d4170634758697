// src/ui/widgets/shortcut.rs
//! Shortcut tile: current folder name, or transfer progress.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn render_shortcut(f: &mut Frame<'_>, area: Rect, label: &str, percent: Option<u8>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Files"), area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    f.render_widget(
        Paragraph::new(label.to_string())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner[0],
    );

    if let Some(pct) = percent {
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC))
                .percent(u16::from(pct.min(100)))
                .label(""),
            inner[1],
        );
    }
}
