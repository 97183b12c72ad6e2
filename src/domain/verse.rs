use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::GitaError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: u32,
    pub description: String,
    pub author_name: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commentary {
    pub id: u32,
    pub description: String,
    pub author_name: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: String,
    pub chapter_number: u8,
    pub verse_number: u16,
    pub slug: String,
    pub sanskrit_text: String,
    pub transliteration: String,
    pub word_meanings: String,
    pub translations: Vec<Translation>,
    /// `None` when upstream carried no commentary; never an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentaries: Option<Vec<Commentary>>,
}

impl Verse {
    /// Derived `"{chapter}-{verse}"` identifier, used as both id and slug.
    pub fn slug_for(chapter_number: u8, verse_number: u16) -> String {
        format!("{}-{}", chapter_number, verse_number)
    }

    pub fn verse_ref(&self) -> VerseRef {
        VerseRef::new(self.chapter_number, self.verse_number)
    }

    /// First translation in author order, the one shown by default.
    pub fn primary_translation(&self) -> Option<&Translation> {
        self.translations.first()
    }

    /// Non-empty text and at least one translation.
    pub fn has_displayable_shape(&self) -> bool {
        !self.sanskrit_text.trim().is_empty() && !self.translations.is_empty()
    }

    pub fn citation(&self) -> String {
        format!("Bhagavad Gita {}", self.verse_ref())
    }

    /// Text used when sharing a verse.
    pub fn share_text(&self) -> String {
        format!("{}\n\n- {}", self.sanskrit_text, self.citation())
    }

    /// Text used when copying a verse: shloka, transliteration and the primary translation.
    pub fn copy_text(&self) -> String {
        let translation = self
            .primary_translation()
            .map(|t| t.description.as_str())
            .unwrap_or("");
        format!(
            "{}\n\nTransliteration: {}\n\n{}\n\n- {}",
            self.sanskrit_text,
            self.transliteration,
            translation,
            self.citation()
        )
    }

    /// Case-insensitive substring match over every text field.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(&self.sanskrit_text)
            || contains(&self.transliteration)
            || contains(&self.word_meanings)
            || self.translations.iter().any(|t| contains(&t.description))
            || self
                .commentaries
                .iter()
                .flatten()
                .any(|c| contains(&c.description))
    }
}

/// Address of a verse. Its text form `"{chapter}.{verse}"` is the bookmark identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseRef {
    pub chapter: u8,
    pub verse: u16,
}

impl VerseRef {
    pub const fn new(chapter: u8, verse: u16) -> Self {
        Self { chapter, verse }
    }

    pub fn previous(&self) -> Option<Self> {
        (self.verse > 1).then(|| Self::new(self.chapter, self.verse - 1))
    }

    pub fn next(&self, verses_count: u16) -> Option<Self> {
        (self.verse < verses_count).then(|| Self::new(self.chapter, self.verse + 1))
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.chapter, self.verse)
    }
}

impl FromStr for VerseRef {
    type Err = GitaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GitaError::CorruptLocalState(format!("invalid verse reference: {s:?}"));

        let (chapter, verse) = s.split_once('.').ok_or_else(invalid)?;
        if chapter.is_empty()
            || verse.is_empty()
            || !chapter.bytes().all(|b| b.is_ascii_digit())
            || !verse.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let chapter = chapter.parse::<u8>().map_err(|_| invalid())?;
        let verse = verse.parse::<u16>().map_err(|_| invalid())?;
        Ok(Self::new(chapter, verse))
    }
}
