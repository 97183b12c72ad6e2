//! Verse of the day.
//!
//! A random verse is cached under [`DAILY_VERSE_KEY`] together with the time
//! it was picked. Reads inside the 24h window never touch the network.

use chrono::Utc;

use crate::app::{GitaError, Result};
use crate::domain::{DailyVerseCacheEntry, Verse};
use crate::repository::Repository;
use crate::store::{LocalStorage, DAILY_VERSE_KEY};

pub struct DailyVerseCache<S> {
    storage: S,
}

impl<S: LocalStorage> DailyVerseCache<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The cached verse if it is still fresh.
    pub fn read_fresh(&self) -> Option<Verse> {
        self.read_fresh_at(Utc::now().timestamp_millis())
    }

    pub fn read_fresh_at(&self, now_ms: i64) -> Option<Verse> {
        let entry = self.read_entry()?;
        if entry.is_fresh_at(now_ms) {
            Some(entry.verse)
        } else {
            tracing::debug!("Cached daily verse {} is stale", entry.verse.verse_ref());
            None
        }
    }

    /// Cached verse when fresh, otherwise a new random verse which replaces
    /// the cache. On failure the existing cache is left as it was. A cache
    /// write that fails is logged and the new verse is still returned.
    pub async fn get_or_refresh(&self, repository: &Repository) -> Result<Verse> {
        if let Some(verse) = self.read_fresh() {
            tracing::debug!("Using cached daily verse {}", verse.verse_ref());
            return Ok(verse);
        }

        let verse = repository.get_random_verse().await?;
        tracing::info!("Picked new daily verse {}", verse.verse_ref());
        if let Err(e) = self.store(&verse) {
            tracing::warn!("Failed to cache daily verse {}: {}", verse.verse_ref(), e);
        }
        Ok(verse)
    }

    pub fn store(&self, verse: &Verse) -> Result<()> {
        self.store_at(verse, Utc::now().timestamp_millis())
    }

    pub fn store_at(&self, verse: &Verse, timestamp_ms: i64) -> Result<()> {
        let entry = DailyVerseCacheEntry::new(verse.clone(), timestamp_ms);
        let raw = serde_json::to_string(&entry)?;
        self.storage.set_item(DAILY_VERSE_KEY, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(DAILY_VERSE_KEY)
    }

    /// Parsed entry, or `None` when absent or unreadable. Entries that fail to
    /// parse are removed.
    fn read_entry(&self) -> Option<DailyVerseCacheEntry> {
        let raw = match self.storage.get_item(DAILY_VERSE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                let err = GitaError::CorruptLocalState(format!("daily verse unreadable: {e}"));
                tracing::warn!("{}", err);
                return None;
            }
        };

        match serde_json::from_str::<DailyVerseCacheEntry>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                let err = GitaError::CorruptLocalState(format!("daily verse entry: {e}"));
                tracing::warn!("Discarding cached daily verse: {}", err);
                if let Err(e) = self.storage.remove_item(DAILY_VERSE_KEY) {
                    tracing::warn!("Failed to discard cached daily verse: {}", e);
                }
                None
            }
        }
    }
}
