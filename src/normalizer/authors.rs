use serde::Deserialize;
use serde_json::Value;

/// Author short-codes in display order. The first author present supplies the
/// primary translation.
pub const AUTHOR_KEYS: &[&str] = &[
    "tej", "siva", "purohit", "chinmay", "san", "adi", "gambir", "madhav", "anand", "rams",
    "raman", "abhinav", "sankar", "jaya", "vallabh", "ms", "srid", "dhan", "venkat", "puru",
    "neel", "prabhu",
];

/// One author's contribution to a verse payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AuthorEntry {
    Plain(String),
    Structured(StructuredEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructuredEntry {
    pub author: Option<String>,
    /// English translation
    pub et: Option<String>,
    /// Hindi translation
    pub ht: Option<String>,
    /// English commentary
    pub ec: Option<String>,
    /// Hindi commentary
    pub hc: Option<String>,
    /// Sanskrit commentary
    pub sc: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Translation,
    Commentary,
}

/// A single text emitted by an author, before ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredText {
    pub kind: EntryKind,
    pub author_name: String,
    pub language: &'static str,
    pub description: String,
}

impl AuthorEntry {
    /// Parse the value stored under an author key. Shapes other than a string
    /// or an object yield `None`.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) | Value::Object(_) => Self::deserialize(value).ok(),
            _ => None,
        }
    }

    /// Texts in emission order: hindi then english translation, then english,
    /// hindi and sanskrit commentary.
    pub fn texts(&self, key: &str) -> Vec<AuthoredText> {
        match self {
            Self::Plain(text) => non_blank(Some(text))
                .map(|description| AuthoredText {
                    kind: EntryKind::Translation,
                    author_name: capitalize(key),
                    language: "english",
                    description,
                })
                .into_iter()
                .collect(),
            Self::Structured(entry) => {
                let author_name =
                    non_blank(entry.author.as_ref()).unwrap_or_else(|| capitalize(key));

                [
                    (EntryKind::Translation, "hindi", &entry.ht),
                    (EntryKind::Translation, "english", &entry.et),
                    (EntryKind::Commentary, "english", &entry.ec),
                    (EntryKind::Commentary, "hindi", &entry.hc),
                    (EntryKind::Commentary, "sanskrit", &entry.sc),
                ]
                .into_iter()
                .filter_map(|(kind, language, field)| {
                    non_blank(field.as_ref()).map(|description| AuthoredText {
                        kind,
                        author_name: author_name.clone(),
                        language,
                        description,
                    })
                })
                .collect()
            }
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Uppercase the first character: `"siva"` → `"Siva"`.
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
