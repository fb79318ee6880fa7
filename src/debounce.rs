//! Cancel-replace scheduling for deferred one-shot actions.
//!
//! A `Debouncer` holds at most one pending deadline per purpose (search
//! lookup, status push, ...). Arming it again discards whatever was pending,
//! so rapid repeated triggers collapse into a single deferred action carrying
//! the last state.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the single slot; a pending deadline is discarded.
    pub fn schedule_from(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Discard any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is currently armed.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True at most once per arming, when `now` has reached the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
