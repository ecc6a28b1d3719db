use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One vocabulary entry as stored in the dataset file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meanings: Option<Vec<String>>,
    /// Fields this tool does not manage, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabularyRecord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    /// Lookup key: trimmed and lowercased word
    pub fn key(&self) -> String {
        normalize_key(&self.word)
    }

    pub fn translate_str(&self) -> &str {
        self.translate.as_deref().unwrap_or("")
    }

    pub fn has_reading(&self) -> bool {
        self.reading.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    pub fn has_translate(&self) -> bool {
        !self.translate_str().trim().is_empty()
    }

    pub fn has_examples(&self) -> bool {
        !self.examples.is_empty()
    }

    pub fn has_meanings(&self) -> bool {
        self.meanings.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// True when reading, translation and examples are all present
    pub fn is_complete(&self) -> bool {
        self.has_reading() && self.has_translate() && self.has_examples()
    }
}

pub fn normalize_key(word: &str) -> String {
    word.trim().to_lowercase()
}
