pub mod chapter;
pub mod daily;
pub mod verse;

pub use chapter::{Chapter, CHAPTER_COUNT};
pub use daily::{DailyVerseCacheEntry, DAILY_VERSE_TTL_MS};
pub use verse::{Commentary, Translation, Verse, VerseRef};
