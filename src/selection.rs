//! Click-to-highlight selection with a single-shot expiry.
//!
//! The host owns the clock: it passes `Instant`s in and polls [`Selection::tick`]
//! from its event loop. Selecting again replaces both the id and the deadline,
//! so a superseded selection never expires.

use std::time::Duration;

use web_time::Instant;

#[derive(Debug, Clone)]
pub struct Selection {
    timeout: Duration,
    current: Option<Selected>,
}

#[derive(Debug, Clone)]
struct Selected {
    id: String,
    deadline: Instant,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

impl Selection {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            current: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Select `id` until `now + timeout`, replacing any pending selection.
    pub fn select(&mut self, id: impl Into<String>, now: Instant) {
        let id = id.into();
        tracing::debug!(step = %id, timeout_ms = self.timeout.as_millis() as u64, "selected step");
        self.current = Some(Selected {
            id,
            deadline: now + self.timeout,
        });
    }

    /// Clear the selection if its deadline has passed. Returns the expired id
    /// exactly once.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|s| now >= s.deadline);
        if !expired {
            return None;
        }
        let id = self.current.take().map(|s| s.id);
        tracing::debug!(step = ?id, "selection expired");
        id
    }

    /// Drop the selection without reporting an expiry.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Alias for [`clear`](Self::clear), used on teardown.
    pub fn cancel(&mut self) {
        self.clear();
    }

    pub fn selected(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.id.as_str())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|s| s.deadline)
    }

    /// Time left before expiry, zero once due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|d| d.checked_duration_since(now).unwrap_or_default())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
