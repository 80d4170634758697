// src/app/notice.rs
//! Fire-and-forget notices shown as a toast line.

use std::time::{Duration, Instant};

use log::{info, warn};
use ringbuf::{traits::*, HeapRb};

use crate::error::FilesError;

/// Notices kept for the history view.
const NOTICE_HISTORY: usize = 32;
/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub at: Instant,
}

/// Recent notices, oldest dropped first.
pub struct Notices {
    recent: HeapRb<Notice>,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

impl Notices {
    pub fn new() -> Self {
        Self {
            recent: HeapRb::new(NOTICE_HISTORY),
        }
    }

    pub fn report(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("notice: {}", text.replace('\n', " "));
        self.push(text, NoticeLevel::Info);
    }

    pub fn report_error(&mut self, err: &FilesError) {
        warn!("notice: {err}");
        self.push(err.to_string(), NoticeLevel::Error);
    }

    fn push(&mut self, text: String, level: NoticeLevel) {
        self.recent.push_overwrite(Notice {
            text,
            level,
            at: Instant::now(),
        });
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.recent.iter().last()
    }

    /// Latest notice if it is still within its display time.
    pub fn active(&self, now: Instant) -> Option<&Notice> {
        self.latest()
            .filter(|n| now.saturating_duration_since(n.at) < NOTICE_TTL)
    }

    pub fn len(&self) -> usize {
        self.recent.occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Notice texts, oldest first.
    pub fn texts(&self) -> Vec<&str> {
        self.recent.iter().map(|n| n.text.as_str()).collect()
    }
}
