use serde::{Deserialize, Serialize};

use super::Verse;

/// How long a cached daily verse stays fresh, in milliseconds.
pub const DAILY_VERSE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVerseCacheEntry {
    pub verse: Verse,
    /// Epoch milliseconds at which the entry was written.
    pub timestamp: i64,
}

impl DailyVerseCacheEntry {
    pub fn new(verse: Verse, timestamp: i64) -> Self {
        Self { verse, timestamp }
    }

    /// Fresh when younger than 24h and the verse still has a usable shape.
    /// Entries stamped in the future are treated as stale.
    pub fn is_fresh_at(&self, now_ms: i64) -> bool {
        let age = now_ms - self.timestamp;
        (0..DAILY_VERSE_TTL_MS).contains(&age) && self.verse.has_displayable_shape()
    }
}
