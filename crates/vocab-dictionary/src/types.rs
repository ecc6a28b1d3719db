use std::collections::HashSet;

use serde::Deserialize;

use crate::FetchError;

/// What the dictionary contributes to a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionaryEntry {
    pub reading: Option<String>,
    pub examples: Vec<String>,
}

impl DictionaryEntry {
    pub fn is_empty(&self) -> bool {
        self.reading.is_none() && self.examples.is_empty()
    }
}

/// Source-language dictionary lookup
#[async_trait::async_trait]
pub trait Dictionary: Send + Sync {
    /// `Ok(None)` when the word is unknown to the dictionary
    async fn lookup(&self, word: &str) -> Result<Option<DictionaryEntry>, FetchError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy)]
pub struct ExampleLimits {
    pub max_examples: usize,
    /// Examples must be strictly shorter than this (in characters)
    pub max_len: usize,
}

impl Default for ExampleLimits {
    fn default() -> Self {
        Self {
            max_examples: 3,
            max_len: 100,
        }
    }
}

/// One element of the dictionary API response array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEntry {
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    pub meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiPhonetic {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMeaning {
    #[serde(default)]
    pub definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDefinition {
    #[serde(default)]
    pub example: Option<String>,
}

/// Pull reading and examples out of the first response entry
pub fn extract_entry(entries: &[ApiEntry], limits: ExampleLimits) -> Option<DictionaryEntry> {
    let entry = entries.first()?;

    let reading = non_empty(entry.phonetic.as_deref()).or_else(|| {
        entry
            .phonetics
            .iter()
            .find_map(|p| non_empty(p.text.as_deref()))
    });

    let mut examples = Vec::new();
    let mut seen = HashSet::new();

    'meanings: for meaning in &entry.meanings {
        for definition in &meaning.definitions {
            if examples.len() >= limits.max_examples {
                break 'meanings;
            }
            let Some(example) = non_empty(definition.example.as_deref()) else {
                continue;
            };
            if example.chars().count() < limits.max_len && seen.insert(example.clone()) {
                examples.push(example);
            }
        }
    }

    Some(DictionaryEntry { reading, examples })
}

pub(crate) fn parse_entries(body: &str) -> Result<Vec<ApiEntry>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = r#"[{
        "word": "account",
        "phonetic": "",
        "phonetics": [{"text": ""}, {"text": "/əˈkaʊnt/", "audio": "x.mp3"}],
        "meanings": [
            {"partOfSpeech": "noun", "definitions": [
                {"definition": "a", "example": "I opened an account."},
                {"definition": "b"},
                {"definition": "c", "example": "  I opened an account.  "}
            ]},
            {"partOfSpeech": "verb", "definitions": [
                {"definition": "d", "example": "How do you account for it?"},
                {"definition": "e", "example": "She gave an account of the trip."},
                {"definition": "f", "example": "A fourth example never makes it."}
            ]}
        ]
    }]"#;

    #[test]
    fn test_stops_after_three_examples() {
        let entries = parse_entries(ACCOUNT).unwrap();
        let entry = extract_entry(&entries, ExampleLimits::default()).unwrap();

        assert_eq!(
            entry.examples,
            vec![
                "I opened an account.",
                "How do you account for it?",
                "She gave an account of the trip.",
            ]
        );
    }

    #[test]
    fn test_reading_falls_back_to_phonetics() {
        let entries = parse_entries(ACCOUNT).unwrap();
        let entry = extract_entry(&entries, ExampleLimits::default()).unwrap();
        assert_eq!(entry.reading.as_deref(), Some("/əˈkaʊnt/"));
    }

    #[test]
    fn test_top_level_phonetic_preferred() {
        let entries = parse_entries(
            r#"[{"phonetic": "/eɪm/", "phonetics": [{"text": "/other/"}], "meanings": []}]"#,
        )
        .unwrap();
        let entry = extract_entry(&entries, ExampleLimits::default()).unwrap();
        assert_eq!(entry.reading.as_deref(), Some("/eɪm/"));
        assert!(entry.examples.is_empty());
    }

    #[test]
    fn test_long_examples_skipped() {
        let long = "x".repeat(100);
        let body = format!(
            r#"[{{"meanings": [{{"definitions": [{{"example": "{long}"}}, {{"example": "short one"}}]}}]}}]"#
        );
        let entries = parse_entries(&body).unwrap();
        let entry = extract_entry(&entries, ExampleLimits::default()).unwrap();
        assert_eq!(entry.examples, vec!["short one"]);
        assert!(entry.reading.is_none());
    }

    #[test]
    fn test_duplicates_are_case_sensitive() {
        let body = r#"[{"meanings": [{"definitions": [
            {"example": "Call me."}, {"example": "call me."}, {"example": "Call me."}
        ]}]}]"#;
        let entries = parse_entries(body).unwrap();
        let entry = extract_entry(&entries, ExampleLimits::default()).unwrap();
        assert_eq!(entry.examples, vec!["Call me.", "call me."]);
    }

    #[test]
    fn test_empty_or_malformed_response() {
        assert!(extract_entry(&parse_entries("[]").unwrap(), ExampleLimits::default()).is_none());
        assert!(matches!(
            parse_entries(r#"{"title": "No Definitions Found"}"#),
            Err(FetchError::Parse(_))
        ));
    }
}
