//! Saved verses.
//!
//! Bookmarks are kept as a JSON array of `"{chapter}.{verse}"` strings under
//! [`BOOKMARKS_KEY`]. Unreadable storage reads as an empty list; entries that
//! do not parse are skipped when listing but left in place on write.

use crate::app::{GitaError, Result};
use crate::domain::VerseRef;
use crate::store::{LocalStorage, BOOKMARKS_KEY};

pub struct BookmarkStore<S> {
    storage: S,
}

impl<S: LocalStorage> BookmarkStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn is_bookmarked(&self, chapter: u8, verse: u16) -> bool {
        let id = VerseRef::new(chapter, verse).to_string();
        self.load_raw().iter().any(|entry| *entry == id)
    }

    /// Add the verse if absent, remove it if present. Returns whether the
    /// verse is bookmarked afterwards.
    pub fn toggle(&self, chapter: u8, verse: u16) -> Result<bool> {
        let id = VerseRef::new(chapter, verse).to_string();
        let mut entries = self.load_raw();

        let bookmarked = if entries.contains(&id) {
            entries.retain(|entry| *entry != id);
            false
        } else {
            entries.push(id);
            true
        };

        self.save_raw(&entries)?;
        tracing::debug!(chapter, verse, bookmarked, "toggled bookmark");
        Ok(bookmarked)
    }

    /// Returns `false` when the verse was already bookmarked.
    pub fn add(&self, chapter: u8, verse: u16) -> Result<bool> {
        let id = VerseRef::new(chapter, verse).to_string();
        let mut entries = self.load_raw();
        if entries.contains(&id) {
            return Ok(false);
        }
        entries.push(id);
        self.save_raw(&entries)?;
        Ok(true)
    }

    /// Returns `false` when the verse was not bookmarked.
    pub fn remove(&self, chapter: u8, verse: u16) -> Result<bool> {
        let id = VerseRef::new(chapter, verse).to_string();
        let mut entries = self.load_raw();
        let before = entries.len();
        entries.retain(|entry| *entry != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save_raw(&entries)?;
        Ok(true)
    }

    /// Bookmarked verses in insertion order.
    pub fn list(&self) -> Vec<VerseRef> {
        let mut refs: Vec<VerseRef> = Vec::new();

        for entry in self.load_raw() {
            match entry.parse::<VerseRef>() {
                Ok(verse_ref) if !refs.contains(&verse_ref) => refs.push(verse_ref),
                Ok(_) => {}
                Err(e) => tracing::debug!("skipping bookmark entry: {}", e),
            }
        }

        refs
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(BOOKMARKS_KEY)
    }

    /// Raw stored strings. Anything unreadable is an empty list.
    fn load_raw(&self) -> Vec<String> {
        let raw = match self.storage.get_item(BOOKMARKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                let err = GitaError::CorruptLocalState(format!("bookmarks unreadable: {e}"));
                tracing::warn!("{}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            // Non-string elements cannot be bookmark ids; drop them here.
            Ok(values) => values
                .into_iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            Err(e) => {
                let err =
                    GitaError::CorruptLocalState(format!("bookmarks are not a JSON list: {e}"));
                tracing::warn!("{}", err);
                Vec::new()
            }
        }
    }

    fn save_raw(&self, entries: &[String]) -> Result<()> {
        let raw = serde_json::to_string(entries)?;
        self.storage.set_item(BOOKMARKS_KEY, &raw)
    }
}
