use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::TableError;
use crate::record::{VocabularyRecord, normalize_key};

/// Hand-curated translations that always win over fetched or existing data
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(word, value)| (normalize_key(word), value.to_string()))
            .collect();
        Self { entries }
    }

    /// Load from a JSON object file (`{"word": "translation", ...}`)
    pub fn load_from_file(path: &Path) -> Result<Self, TableError> {
        if !path.exists() {
            return Err(TableError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let raw: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| TableError::ParseError(e.to_string()))?;

        tracing::info!("Loaded {} overrides from {}", raw.len(), path.display());
        Ok(Self::from_pairs(raw.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(&normalize_key(word)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply the override for this record, if any.
    ///
    /// Returns `None` when the word has no override, otherwise whether the
    /// record changed.
    pub fn apply(&self, record: &mut VocabularyRecord) -> Option<bool> {
        let value = self.get(&record.word)?;
        let mut changed = false;

        if record.translate.as_deref() != Some(value) {
            record.translate = Some(value.to_string());
            changed = true;
        }
        if !record.has_meanings() {
            record.meanings = Some(vec![value.to_string()]);
            changed = true;
        }

        Some(changed)
    }
}

/// Words whose translation is always re-fetched
#[derive(Debug, Clone, Default)]
pub struct Denylist {
    words: HashSet<String>,
}

impl Denylist {
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words.into_iter().map(normalize_key).collect(),
        }
    }

    /// Load from a JSON array file (`["word", ...]`)
    pub fn load_from_file(path: &Path) -> Result<Self, TableError> {
        if !path.exists() {
            return Err(TableError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let raw: Vec<String> =
            serde_json::from_str(&content).map_err(|e| TableError::ParseError(e.to_string()))?;

        tracing::info!("Loaded {} denylisted words from {}", raw.len(), path.display());
        Ok(Self::from_words(raw.iter().map(String::as_str)))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize_key(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
