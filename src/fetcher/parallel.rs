use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::{GitaError, Result};
use crate::domain::{Chapter, Verse, VerseRef};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

pub const DEFAULT_WORKERS: usize = 10;

/// Fans verse fetches out over a bounded number of concurrent requests.
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Fetch every ref concurrently. Results come back in input order, one
    /// slot per ref, regardless of completion order.
    pub async fn fetch_verses(
        &self,
        refs: &[VerseRef],
        normalizer: &Normalizer,
    ) -> Vec<(VerseRef, Result<Verse>)> {
        let handles: Vec<_> = refs
            .iter()
            .map(|&verse_ref| {
                let fetcher = self.fetcher.clone();
                let semaphore = self.semaphore.clone();
                let normalizer = normalizer.clone();

                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire()
                        .await
                        .map_err(|e| GitaError::Other(format!("fetch pool closed: {e}")))?;

                    fetch_single_verse(fetcher.as_ref(), &normalizer, verse_ref).await
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .zip(refs.iter().copied())
            .map(|(joined, verse_ref)| {
                let result = joined.unwrap_or_else(|e| {
                    tracing::error!("Task join error for verse {}: {}", verse_ref, e);
                    Err(GitaError::Other(format!("verse {verse_ref} fetch task failed: {e}")))
                });
                (verse_ref, result)
            })
            .collect()
    }
}

pub fn verse_path(verse_ref: VerseRef) -> String {
    format!("/slok/{}/{}", verse_ref.chapter, verse_ref.verse)
}

pub fn chapter_path(chapter_number: u8) -> String {
    format!("/chapter/{}", chapter_number)
}

/// Fetch and normalize one verse. Out-of-range chapters and upstream 404s are
/// reported as `NotFound`.
pub async fn fetch_single_verse(
    fetcher: &(dyn Fetcher + Send + Sync),
    normalizer: &Normalizer,
    verse_ref: VerseRef,
) -> Result<Verse> {
    if !Chapter::is_valid_number(verse_ref.chapter) || verse_ref.verse == 0 {
        return Err(GitaError::NotFound(format!("verse {}", verse_ref)));
    }

    let payload = fetcher
        .fetch(&verse_path(verse_ref), &[])
        .await
        .map_err(|e| e.or_not_found(format!("verse {}", verse_ref)))?;

    normalizer.normalize_verse(verse_ref, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Serves verses with a delay that shrinks as the verse number grows, so
    /// later verses complete first.
    struct ReversedLatencyFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ReversedLatencyFetcher {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Fetcher for ReversedLatencyFetcher {
        async fn fetch(&self, path: &str, _query: &[(&str, &str)]) -> Result<Value> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            let verse: u64 = path.rsplit('/').next().unwrap().parse().unwrap();
            tokio::time::sleep(Duration::from_millis(60 - verse * 5)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if verse == 3 {
                return Err(GitaError::network(Some(500), "boom"));
            }
            Ok(json!({ "chapter": 1, "verse": verse, "slok": format!("text {verse}") }))
        }
    }

    #[tokio::test]
    async fn test_results_in_input_order_with_failures_in_place() {
        let fetcher = Arc::new(ReversedLatencyFetcher::new());
        let parallel = ParallelFetcher::with_workers(fetcher.clone(), 4);
        let refs: Vec<_> = (1..=8).map(|v| VerseRef::new(1, v)).collect();

        let results = parallel.fetch_verses(&refs, &Normalizer::new()).await;

        assert_eq!(results.len(), 8);
        for (i, (verse_ref, result)) in results.iter().enumerate() {
            assert_eq!(verse_ref.verse as usize, i + 1);
            if verse_ref.verse == 3 {
                assert!(result.is_err());
            } else {
                assert_eq!(result.as_ref().unwrap().verse_number, verse_ref.verse);
            }
        }
        assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn test_single_verse_out_of_range_skips_network() {
        let fetcher = ReversedLatencyFetcher::new();
        let normalizer = Normalizer::new();

        for verse_ref in [VerseRef::new(0, 1), VerseRef::new(19, 1), VerseRef::new(2, 0)] {
            let err = fetch_single_verse(&fetcher, &normalizer, verse_ref)
                .await
                .unwrap_err();
            assert!(matches!(err, GitaError::NotFound(_)));
        }
        assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_paths() {
        assert_eq!(verse_path(VerseRef::new(2, 47)), "/slok/2/47");
        assert_eq!(chapter_path(18), "/chapter/18");
    }
}
