use serde_json::Value;

use crate::error::StoreError;
use crate::record::VocabularyRecord;

const WORD_KEYS: &[&str] = &["word", "lexeme", "text"];
const READING_KEYS: &[&str] = &["reading", "pron"];
const POS_KEYS: &[&str] = &["pos", "type"];
const TRANSLATE_KEYS: &[&str] = &["translate", "meaning"];

/// Convert a raw word list into canonical records.
///
/// Accepts either an array of plain strings or an array of objects using
/// any of the known alias field names.
pub fn normalize_value(value: &Value) -> Result<Vec<VocabularyRecord>, StoreError> {
    let Value::Array(items) = value else {
        return Err(StoreError::InvalidFormat("expected a JSON array".into()));
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(word) => Ok(VocabularyRecord::new(word.trim())),
            Value::Object(_) => Ok(normalize_object(item)),
            other => Err(StoreError::InvalidFormat(format!(
                "item {idx} is neither a string nor an object: {other}"
            ))),
        })
        .collect()
}

fn normalize_object(item: &Value) -> VocabularyRecord {
    let mut record = VocabularyRecord::new(first_str(item, WORD_KEYS).unwrap_or_default());
    record.reading = first_str(item, READING_KEYS);
    record.pos = first_str(item, POS_KEYS);
    record.translate = first_str(item, TRANSLATE_KEYS);

    record.examples = match (item.get("examples"), item.get("example")) {
        (Some(Value::Array(list)), _) => list
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        (_, Some(Value::String(single))) if !single.trim().is_empty() => vec![single.clone()],
        _ => Vec::new(),
    };

    record
}

/// First non-empty string under any of the keys
fn first_str(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
