// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Visibility state for UI sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionVisibility {
    /// Browser window
    pub window: bool,
    /// Shortcut tile
    pub shortcut: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            window: true,
            shortcut: true,
        }
    }
}

/// Computed layout areas for rendering.
pub struct ComputedLayout {
    pub window: Option<Rect>,
    pub shortcut: Option<Rect>,
    /// One-line notice/prompt bar at the bottom
    pub status: Rect,
}

/// Compute the layout based on total area and section visibility.
pub fn compute_layout(area: Rect, visibility: &SectionVisibility) -> ComputedLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let (main_area, status) = (vertical[0], vertical[1]);

    let (window, shortcut) = match (visibility.window, visibility.shortcut) {
        (true, true) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
                .split(main_area);
            (Some(columns[0]), Some(columns[1]))
        }
        (true, false) => (Some(main_area), None),
        (false, true) => {
            let tile = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(25), Constraint::Min(0)])
                .split(main_area);
            (None, Some(tile[0]))
        }
        (false, false) => (None, None),
    };

    ComputedLayout {
        window,
        shortcut,
        status,
    }
}
