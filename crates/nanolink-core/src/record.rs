use jiff::{SignedDuration, Timestamp};
use std::collections::VecDeque;

/// Maximum number of access timestamps retained per record.
pub const MAX_ACCESS_HISTORY: usize = 10;

/// A stored URL record.
///
/// The access history is kept in chronological order (most recent last) and
/// bounded to [`MAX_ACCESS_HISTORY`] entries; trimming always drops the
/// oldest entries, never the one just appended.
#[derive(Debug, Clone)]
pub struct UrlRecord {
    /// The redirect target. Set at creation, replaced only by re-creation.
    pub long_url: String,
    /// When the record was created. Never changes; TTL updates are measured
    /// from this instant.
    pub created_at: Timestamp,
    /// Time-to-live relative to `created_at`. Extendable via update.
    pub ttl: SignedDuration,
    /// Number of successful resolves.
    pub access_count: u64,
    access_history: VecDeque<Timestamp>,
}

impl UrlRecord {
    pub fn new(long_url: impl Into<String>, created_at: Timestamp, ttl: SignedDuration) -> Self {
        Self {
            long_url: long_url.into(),
            created_at,
            ttl,
            access_count: 0,
            access_history: VecDeque::new(),
        }
    }

    /// A record is live strictly before `created_at + ttl`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self.created_at.checked_add(self.ttl) {
            Ok(expires_at) => now >= expires_at,
            // TTL past the representable range: never expires.
            Err(_) => false,
        }
    }

    /// Records one successful resolve: bumps the counter and appends the
    /// access timestamp, trimming the history back to the most recent
    /// [`MAX_ACCESS_HISTORY`] entries.
    pub fn record_access(&mut self, now: Timestamp) {
        self.access_count += 1;
        self.access_history.push_back(now);
        while self.access_history.len() > MAX_ACCESS_HISTORY {
            self.access_history.pop_front();
        }
    }

    /// Retained access timestamps, most recent first.
    pub fn recent_accesses(&self) -> Vec<Timestamp> {
        self.access_history.iter().rev().copied().collect()
    }
}
