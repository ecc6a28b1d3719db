use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record::VocabularyRecord;

pub const DEFAULT_JS_CONST: &str = "OXFORD_DATA";

/// Load the dataset: a JSON array of record objects
pub fn load_records(path: &Path) -> Result<Vec<VocabularyRecord>, StoreError> {
    let data = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let records: Vec<VocabularyRecord> = serde_json::from_str(&data)?;
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Serialize the dataset the way it is stored on disk: two-space indent,
/// non-ASCII kept literal
pub fn render_json(records: &[VocabularyRecord]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Serialize as a script constant, e.g. `const OXFORD_DATA = [...];`
pub fn render_js_constant(name: &str, records: &[VocabularyRecord]) -> Result<String, StoreError> {
    if !is_identifier(name) {
        return Err(StoreError::InvalidFormat(format!(
            "'{name}' is not a valid constant name"
        )));
    }
    Ok(format!("const {name} = {};", render_json(records)?))
}

/// Rewrite the canonical file with the full collection
pub fn save_records(path: &Path, records: &[VocabularyRecord]) -> Result<(), StoreError> {
    write_replace(path, &render_json(records)?)?;
    tracing::debug!("Snapshot of {} records written to {}", records.len(), path.display());
    Ok(())
}

pub fn save_js(path: &Path, name: &str, records: &[VocabularyRecord]) -> Result<(), StoreError> {
    write_replace(path, &render_js_constant(name, records)?)?;
    tracing::info!("Synced {} records to {}", records.len(), path.display());
    Ok(())
}

/// Progress marker written next to snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub pass: String,
    pub processed: usize,
    pub total: usize,
    pub updated: usize,
    pub failed: Vec<String>,
    pub updated_at_unix: u64,
}

impl Checkpoint {
    pub fn new(pass: impl Into<String>, processed: usize, total: usize) -> Self {
        let updated_at_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Self {
            pass: pass.into(),
            processed,
            total,
            updated_at_unix,
            ..Default::default()
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_replace(path, &serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let data = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Write to a sibling temp file, then rename over the target
fn write_replace(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, contents).map_err(|source| io_error(&tmp, source))?;
    fs::rename(&tmp, path).map_err(|source| io_error(path, source))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
