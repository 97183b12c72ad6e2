//! Chapter and verse queries over the upstream API.
//!
//! ```text
//! list_verses(c):  GET /chapter/{c} ──► verses_count
//!                  GET /slok/{c}/1 ┐
//!                  GET /slok/{c}/2 ├─► normalize ─► ordered VerseBatch
//!                  ...             ┘
//! ```
//!
//! Per-verse failures inside a fan-out are logged and reported through
//! [`VerseBatch::skipped`]; they never fail the whole call.

use std::sync::Arc;

use crate::app::{GitaError, Result};
use crate::domain::{Chapter, Verse, VerseRef, CHAPTER_COUNT};
use crate::fetcher::parallel::{chapter_path, fetch_single_verse, ParallelFetcher};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

/// Known-good verse used when a random pick fails.
pub const FALLBACK_VERSE: VerseRef = VerseRef::new(2, 1);

/// Outcome of a fan-out fetch: successes in request order plus the refs that failed.
#[derive(Debug, Default)]
pub struct VerseBatch {
    pub verses: Vec<Verse>,
    pub skipped: Vec<VerseRef>,
}

impl VerseBatch {
    fn collect(results: Vec<(VerseRef, Result<Verse>)>) -> Self {
        let mut batch = Self::default();
        for (verse_ref, result) in results {
            match result {
                Ok(verse) => batch.verses.push(verse),
                Err(e) => {
                    tracing::warn!("Skipping verse {}: {}", verse_ref, e);
                    batch.skipped.push(verse_ref);
                }
            }
        }
        batch
    }
}

pub struct Repository {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parallel_fetcher: ParallelFetcher,
    normalizer: Normalizer,
}

impl Repository {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            parallel_fetcher: ParallelFetcher::with_workers(fetcher.clone(), workers),
            fetcher,
            normalizer: Normalizer::new(),
        }
    }

    /// All chapters, ordered by number. Fails as a whole on any error.
    pub async fn list_chapters(&self) -> Result<Vec<Chapter>> {
        let payload = self.fetcher.fetch("/chapters", &[]).await?;
        self.normalizer.normalize_chapters(&payload)
    }

    pub async fn get_chapter(&self, chapter_number: u8) -> Result<Chapter> {
        self.list_chapters()
            .await?
            .into_iter()
            .find(|c| c.chapter_number == chapter_number)
            .ok_or_else(|| GitaError::NotFound(format!("chapter {}", chapter_number)))
    }

    /// Single chapter record from `/chapter/{n}`, the source of `verses_count`.
    pub async fn chapter_metadata(&self, chapter_number: u8) -> Result<Chapter> {
        if !Chapter::is_valid_number(chapter_number) {
            return Err(GitaError::NotFound(format!("chapter {}", chapter_number)));
        }

        let payload = self
            .fetcher
            .fetch(&chapter_path(chapter_number), &[])
            .await
            .map_err(|e| e.or_not_found(format!("chapter {}", chapter_number)))?;

        self.normalizer.normalize_chapter(&payload)
    }

    /// Every verse of a chapter that could be fetched, in verse order.
    pub async fn list_verses(&self, chapter_number: u8) -> Result<Vec<Verse>> {
        Ok(self.fetch_chapter_verses(chapter_number).await?.verses)
    }

    /// Like [`list_verses`](Self::list_verses), also reporting which verses failed.
    pub async fn fetch_chapter_verses(&self, chapter_number: u8) -> Result<VerseBatch> {
        let chapter = self.chapter_metadata(chapter_number).await?;
        let refs: Vec<VerseRef> = (1..=chapter.verses_count)
            .map(|verse| VerseRef::new(chapter_number, verse))
            .collect();

        let batch = self.get_verses(&refs).await;
        tracing::info!(
            chapter = chapter_number,
            fetched = batch.verses.len(),
            skipped = batch.skipped.len(),
            "fetched chapter verses"
        );
        Ok(batch)
    }

    /// Fetch arbitrary verses concurrently, keeping the order of `refs`.
    pub async fn get_verses(&self, refs: &[VerseRef]) -> VerseBatch {
        let results = self
            .parallel_fetcher
            .fetch_verses(refs, &self.normalizer)
            .await;
        VerseBatch::collect(results)
    }

    pub async fn get_verse(&self, chapter_number: u8, verse_number: u16) -> Result<Verse> {
        fetch_single_verse(
            self.fetcher.as_ref(),
            &self.normalizer,
            VerseRef::new(chapter_number, verse_number),
        )
        .await
    }

    /// A uniformly chosen verse. Falls back once to [`FALLBACK_VERSE`]; if
    /// that also fails the original error is returned.
    pub async fn get_random_verse(&self) -> Result<Verse> {
        let err = match self.pick_random_verse().await {
            Ok(verse) => return Ok(verse),
            Err(e) => e,
        };

        tracing::warn!("Random verse failed ({}), falling back to {}", err, FALLBACK_VERSE);

        match self
            .get_verse(FALLBACK_VERSE.chapter, FALLBACK_VERSE.verse)
            .await
        {
            Ok(verse) => Ok(verse),
            Err(fallback_err) => {
                tracing::error!("Fallback verse {} failed: {}", FALLBACK_VERSE, fallback_err);
                Err(err)
            }
        }
    }

    async fn pick_random_verse(&self) -> Result<Verse> {
        let chapter_number = random_below(u64::from(CHAPTER_COUNT))? as u8 + 1;
        let chapter = self.chapter_metadata(chapter_number).await?;
        let verse_number = random_below(u64::from(chapter.verses_count))? as u16 + 1;

        tracing::debug!(chapter = chapter_number, verse = verse_number, "picked random verse");
        self.get_verse(chapter_number, verse_number).await
    }

    /// Verses of `chapters` (all chapters when empty) whose text contains `query`.
    pub async fn search_verses(&self, query: &str, chapters: &[u8]) -> Result<Vec<Verse>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let chapters: Vec<u8> = if chapters.is_empty() {
            (1..=CHAPTER_COUNT).collect()
        } else {
            chapters.to_vec()
        };

        let mut matches = Vec::new();
        for chapter_number in chapters {
            let verses = self.list_verses(chapter_number).await?;
            matches.extend(verses.into_iter().filter(|v| v.matches(query)));
        }

        Ok(matches)
    }
}

/// Uniform integer in `0..upper`. `upper` must be non-zero.
fn random_below(upper: u64) -> Result<u64> {
    if upper == 0 {
        return Err(GitaError::Other("cannot pick from an empty range".into()));
    }

    // Rejection sampling keeps the distribution uniform.
    let zone = u64::MAX - (u64::MAX % upper);
    loop {
        let mut bytes = [0u8; 8];
        getrandom::fill(&mut bytes)
            .map_err(|e| GitaError::Other(format!("random source unavailable: {e}")))?;
        let value = u64::from_le_bytes(bytes);
        if value < zone {
            return Ok(value % upper);
        }
    }
}
