// src/ui/widgets/status_line.rs
//! Bottom line: message prompt, latest notice, or key help.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{Notice, NoticeLevel};

const HELP: &str = "⏎ open  l long-press  ← up  r request  ! window  @ shortcut  q quit";

pub fn render_status_line(
    f: &mut Frame<'_>,
    area: Rect,
    prompt: Option<&str>,
    notice: Option<&Notice>,
) {
    let line = match (prompt, notice) {
        (Some(text), _) => Line::from(vec![
            Span::styled("message> ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{text}_")),
        ]),
        (None, Some(notice)) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            Line::styled(notice.text.replace('\n', " "), Style::default().fg(color))
        }
        (None, None) => Line::styled(HELP, Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(line), area);
}
