//! Caller-supplied deadlines and completion status.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Point in time after which long-running stages stop and return their best
/// result so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    pub fn after(duration: Duration) -> Self {
        Self(Instant::now().checked_add(duration))
    }

    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|instant| Instant::now() >= instant)
    }
}

/// Whether a result covers the whole computation or is a best effort cut
/// short by a [`Deadline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    Complete,
    Cancelled,
}

impl Completion {
    pub fn is_complete(self) -> bool {
        self == Completion::Complete
    }

    /// Combine the status of two stages; any cancellation wins.
    pub fn and(self, other: Completion) -> Completion {
        if self.is_complete() && other.is_complete() {
            Completion::Complete
        } else {
            Completion::Cancelled
        }
    }
}
