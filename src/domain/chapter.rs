use serde::{Deserialize, Serialize};

pub const CHAPTER_COUNT: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    pub chapter_number: u8,
    /// Sanskrit chapter title, empty when upstream omits it.
    #[serde(default)]
    pub name: String,
    pub name_transliterated: String,
    pub name_translated: String,
    pub verses_count: u16,
    pub summary_english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_hindi: Option<String>,
}

impl Chapter {
    pub fn is_valid_number(chapter_number: u8) -> bool {
        (1..=CHAPTER_COUNT).contains(&chapter_number)
    }

    pub fn display_title(&self) -> &str {
        if self.name_translated.is_empty() {
            &self.name_transliterated
        } else {
            &self.name_translated
        }
    }
}
