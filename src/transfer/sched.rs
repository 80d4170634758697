// src/transfer/sched.rs
//! Periodic task slot driven by the event loop.
//!
//! The task is allocated once and parked at [`TaskPriority::Off`] between
//! transfers; arming it only changes period and priority.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
    Off,
    High,
}

#[derive(Debug, Clone)]
pub struct PeriodicTask {
    period: Duration,
    priority: TaskPriority,
    last_run: Instant,
}

impl PeriodicTask {
    pub fn new(period: Duration, priority: TaskPriority) -> Self {
        Self {
            period,
            priority,
            last_run: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn is_armed(&self) -> bool {
        self.priority != TaskPriority::Off
    }

    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Restart the period from now.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.last_run = now;
    }

    pub fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Time left until the task is due, or `None` while it is off.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if !self.is_armed() {
            return None;
        }
        Some((self.last_run + self.period).saturating_duration_since(now))
    }

    /// True if the task should run at `now`; starts the next period when it does.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.time_until_due(now) {
            Some(left) if left.is_zero() => {
                self.last_run = now;
                true
            }
            _ => false,
        }
    }
}
