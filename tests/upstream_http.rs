mod upstream_stub;

use std::sync::Arc;

use gitapath::app::{AppContext, GitaError};
use gitapath::domain::VerseRef;
use gitapath::fetcher::http_fetcher::HttpFetcher;
use gitapath::store::SqliteStore;

use upstream_stub::{UpstreamStub, UpstreamStubConfig};

fn context(stub: &UpstreamStub, db: Arc<SqliteStore>) -> AppContext {
    let fetcher = HttpFetcher::new(&stub.base_url).expect("build fetcher");
    AppContext::from_parts(Arc::new(fetcher), db, 3)
}

fn memory_context(stub: &UpstreamStub) -> AppContext {
    context(stub, Arc::new(SqliteStore::in_memory().expect("open store")))
}

#[tokio::test]
async fn chapters_over_http() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 4,
        ..Default::default()
    });
    let ctx = memory_context(&stub);

    let chapters = ctx.repository.list_chapters().await.unwrap();
    assert_eq!(chapters.len(), 18);
    assert_eq!(chapters[0].name_translated, "Meaning 1");
    assert_eq!(chapters[0].summary_hindi.as_deref(), Some("सारांश"));

    let chapter = ctx.repository.get_chapter(12).await.unwrap();
    assert_eq!(chapter.chapter_number, 12);
    assert_eq!(chapter.verses_count, 4);
}

#[tokio::test]
async fn verse_over_http_is_normalized() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 72,
        ..Default::default()
    });
    let ctx = memory_context(&stub);

    let verse = ctx.repository.get_verse(2, 47).await.unwrap();
    assert_eq!(verse.id, "2-47");
    assert_eq!(verse.sanskrit_text, "श्लोक 2.47");

    let translations: Vec<(&str, &str)> = verse
        .translations
        .iter()
        .map(|t| (t.author_name.as_str(), t.language.as_str()))
        .collect();
    assert_eq!(
        translations,
        vec![
            ("Swami Tejomayananda", "hindi"),
            ("Swami Sivananda", "english"),
            ("Shri Purohit Swami", "english"),
        ]
    );
    assert_eq!(verse.commentaries.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn missing_verse_is_not_found() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 5,
        ..Default::default()
    });
    let ctx = memory_context(&stub);

    let err = ctx.repository.get_verse(3, 99).await.unwrap_err();
    assert!(matches!(err, GitaError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn chapter_fan_out_skips_failed_verses() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 9,
        broken: vec![(6, 2)],
        garbled: vec![(6, 7)],
    });
    let ctx = memory_context(&stub);

    let batch = ctx.repository.fetch_chapter_verses(6).await.unwrap();

    let numbers: Vec<u16> = batch.verses.iter().map(|v| v.verse_number).collect();
    assert_eq!(numbers, vec![1, 3, 4, 5, 6, 8, 9]);
    assert_eq!(batch.skipped, vec![VerseRef::new(6, 2), VerseRef::new(6, 7)]);
    // One metadata request plus one per verse
    assert_eq!(stub.request_count(), 10);
}

#[tokio::test]
async fn garbled_body_is_malformed_payload() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 3,
        garbled: vec![(1, 1)],
        ..Default::default()
    });
    let ctx = memory_context(&stub);

    let err = ctx.repository.get_verse(1, 1).await.unwrap_err();
    assert!(matches!(err, GitaError::MalformedPayload(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_keeps_status() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 3,
        broken: vec![(1, 2)],
        ..Default::default()
    });
    let ctx = memory_context(&stub);

    let err = ctx.repository.get_verse(1, 2).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn saved_verses_resolve_in_bookmark_order() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 10,
        broken: vec![(5, 5)],
        ..Default::default()
    });
    let ctx = memory_context(&stub);

    ctx.bookmarks.toggle(9, 3).unwrap();
    ctx.bookmarks.toggle(5, 5).unwrap();
    ctx.bookmarks.toggle(1, 10).unwrap();

    let batch = ctx.repository.get_verses(&ctx.bookmarks.list()).await;
    let refs: Vec<VerseRef> = batch.verses.iter().map(|v| v.verse_ref()).collect();
    assert_eq!(refs, vec![VerseRef::new(9, 3), VerseRef::new(1, 10)]);
    assert_eq!(batch.skipped, vec![VerseRef::new(5, 5)]);
}

#[tokio::test]
async fn daily_verse_survives_reopen_without_refetch() {
    let stub = UpstreamStub::spawn(UpstreamStubConfig {
        verses_per_chapter: 6,
        ..Default::default()
    });
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gitapath.db");

    let first = {
        let ctx = context(&stub, Arc::new(SqliteStore::new(&db_path).unwrap()));
        ctx.daily.get_or_refresh(&ctx.repository).await.unwrap()
    };
    let requests = stub.request_count();

    let ctx = context(&stub, Arc::new(SqliteStore::new(&db_path).unwrap()));
    let second = ctx.daily.get_or_refresh(&ctx.repository).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(stub.request_count(), requests);
}
