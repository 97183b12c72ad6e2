pub mod authors;

use html_escape::decode_html_entities;
use serde_json::{Map, Value};

use crate::app::{GitaError, Result};
use crate::domain::{Chapter, Commentary, Translation, Verse, VerseRef};

pub use authors::{AuthorEntry, EntryKind, StructuredEntry, AUTHOR_KEYS};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Reshape one upstream verse payload. `requested` fixes the chapter and
    /// verse numbers; a payload that names a different verse is malformed.
    pub fn normalize_verse(&self, requested: VerseRef, payload: &Value) -> Result<Verse> {
        let object = payload.as_object().ok_or_else(|| {
            GitaError::MalformedPayload(format!(
                "verse {} payload is {}, expected an object",
                requested,
                json_kind(payload)
            ))
        })?;

        let chapter = number_field(object, &["chapter", "chapter_number"]);
        let verse = number_field(object, &["verse", "verse_number"]);
        let disagrees = chapter.is_some_and(|c| c != u64::from(requested.chapter))
            || verse.is_some_and(|v| v != u64::from(requested.verse));
        if disagrees {
            return Err(GitaError::MalformedPayload(format!(
                "requested verse {} but payload names {}.{}",
                requested,
                chapter.map_or_else(|| "?".to_string(), |c| c.to_string()),
                verse.map_or_else(|| "?".to_string(), |v| v.to_string()),
            )));
        }
        let chapter_number = requested.chapter;
        let verse_number = requested.verse;

        let mut translations = Vec::new();
        let mut commentaries = Vec::new();

        for key in AUTHOR_KEYS {
            let Some(value) = object.get(*key) else {
                continue;
            };

            let Some(entry) = AuthorEntry::parse(value) else {
                tracing::debug!(
                    author = *key,
                    verse = %requested,
                    "skipping author entry of unexpected shape: {}",
                    json_kind(value)
                );
                continue;
            };

            for text in entry.texts(key) {
                let description = decode_html_entities(&text.description).to_string();
                match text.kind {
                    EntryKind::Translation => translations.push(Translation {
                        id: translations.len() as u32 + 1,
                        description,
                        author_name: text.author_name,
                        language: text.language.to_string(),
                    }),
                    EntryKind::Commentary => commentaries.push(Commentary {
                        id: commentaries.len() as u32 + 1,
                        description,
                        author_name: text.author_name,
                        language: text.language.to_string(),
                    }),
                }
            }
        }

        let slug = Verse::slug_for(chapter_number, verse_number);

        Ok(Verse {
            id: slug.clone(),
            chapter_number,
            verse_number,
            slug,
            sanskrit_text: text_field(object, &["slok", "text"]),
            transliteration: text_field(object, &["transliteration"]),
            word_meanings: text_field(object, &["word_meanings"]),
            translations,
            commentaries: (!commentaries.is_empty()).then_some(commentaries),
        })
    }

    /// Map one upstream chapter record onto [`Chapter`].
    pub fn normalize_chapter(&self, payload: &Value) -> Result<Chapter> {
        let object = payload.as_object().ok_or_else(|| {
            GitaError::MalformedPayload(format!(
                "chapter payload is {}, expected an object",
                json_kind(payload)
            ))
        })?;

        let chapter_number = number_field(object, &["chapter_number"])
            .and_then(|n| u8::try_from(n).ok())
            .filter(|n| Chapter::is_valid_number(*n))
            .ok_or_else(|| {
                GitaError::MalformedPayload("chapter payload without a valid chapter_number".into())
            })?;

        let verses_count = number_field(object, &["verses_count"])
            .and_then(|n| u16::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                GitaError::MalformedPayload(format!(
                    "chapter {} without a positive verses_count",
                    chapter_number
                ))
            })?;

        let id = number_field(object, &["id"])
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(u32::from(chapter_number));

        let summary_hindi = nested_text(object, "summary", "hi")
            .or_else(|| optional_text(object, "chapter_summary_hindi"));

        Ok(Chapter {
            id,
            chapter_number,
            name: text_field(object, &["name"]),
            name_transliterated: text_field(object, &["name_transliterated", "transliteration"]),
            name_translated: nested_text(object, "meaning", "en")
                .unwrap_or_else(|| text_field(object, &["name_translated", "translation"])),
            verses_count,
            summary_english: nested_text(object, "summary", "en")
                .unwrap_or_else(|| text_field(object, &["chapter_summary"])),
            summary_hindi,
        })
    }

    /// Normalize a chapter list. Any bad record fails the whole list.
    pub fn normalize_chapters(&self, payload: &Value) -> Result<Vec<Chapter>> {
        let records = payload.as_array().ok_or_else(|| {
            GitaError::MalformedPayload(format!(
                "chapter list payload is {}, expected an array",
                json_kind(payload)
            ))
        })?;

        let mut chapters = records
            .iter()
            .map(|record| self.normalize_chapter(record))
            .collect::<Result<Vec<_>>>()?;

        chapters.sort_by_key(|c| c.chapter_number);
        Ok(chapters)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// First of `keys` holding a non-negative integer, also accepting numeric strings.
fn number_field(object: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn optional_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| decode_html_entities(s).to_string())
}

/// First non-blank string among `keys`, or an empty string.
fn text_field(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| optional_text(object, key))
        .unwrap_or_default()
}

fn nested_text(object: &Map<String, Value>, key: &str, inner: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_object)
        .and_then(|nested| optional_text(nested, inner))
}
