pub mod sqlite;

use std::sync::Arc;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// Storage key holding the JSON bookmark list.
pub const BOOKMARKS_KEY: &str = "gitaBookmarks";
/// Storage key holding the JSON daily verse cache entry.
pub const DAILY_VERSE_KEY: &str = "gitapath-daily-verse";

/// String key/value persistence, shaped after browser local storage.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<S: LocalStorage + ?Sized> LocalStorage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
