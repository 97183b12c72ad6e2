use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::{GitaError, Result};
use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::daily::DailyVerseCache;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::repository::Repository;
use crate::store::sqlite::SqliteStore;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub repository: Repository,
    pub bookmarks: BookmarkStore<Arc<SqliteStore>>,
    pub daily: DailyVerseCache<Arc<SqliteStore>>,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let db_path = match &config.storage.path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: &Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_store(config, store)
    }

    fn with_store(config: &Config, store: Arc<SqliteStore>) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_timeout(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?);

        Ok(Self::from_parts(fetcher, store, config.api.max_concurrency))
    }

    /// Wire the services around an arbitrary fetcher.
    pub fn from_parts(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<SqliteStore>,
        workers: usize,
    ) -> Self {
        Self {
            repository: Repository::new(fetcher, workers),
            bookmarks: BookmarkStore::new(store.clone()),
            daily: DailyVerseCache::new(store.clone()),
            store,
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GitaError::Config("Could not find data directory".into()))?;
        let app_dir = data_dir.join("gitapath");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("gitapath.db"))
    }
}
