//! # gitapath
//!
//! A Bhagavad Gita reader backed by a public read-only scripture API.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Repository → CLI
//!                            ↑
//!          Bookmarks / Daily verse → LocalStorage (SQLite)
//! ```
//!
//! - [`fetcher`]: HTTP client and bounded parallel verse fetching
//! - [`normalizer`]: Reshapes per-author verse payloads into [`Verse`](domain::Verse)
//! - [`repository`]: Chapter and verse queries, random verse with fallback
//! - [`bookmarks`]: Saved verses
//! - [`daily`]: Verse of the day, cached for 24 hours
//! - [`store`]: Key/value local storage
//!
//! ## Quick Start
//!
//! ```bash
//! gitapath chapters
//! gitapath verse 2 47
//! gitapath bookmark 2 47
//! gitapath daily
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the repository,
/// local store, bookmarks and daily verse cache.
pub mod app;

/// Saved verses over local storage.
pub mod bookmarks;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/gitapath/config.toml`.
pub mod config;

/// Verse of the day with a 24 hour cache.
pub mod daily;

/// Core domain models.
///
/// - [`Chapter`](domain::Chapter): chapter metadata
/// - [`Verse`](domain::Verse): shloka with translations and commentaries
/// - [`VerseRef`](domain::VerseRef): `chapter.verse` address
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for upstream JSON requests
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Bounded concurrent verse fetching
pub mod fetcher;

/// Verse and chapter payload normalization.
pub mod normalizer;

/// Chapter and verse queries.
pub mod repository;

/// Local key/value persistence.
///
/// - [`LocalStorage`](store::LocalStorage): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
