use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::batch::BatchConfig;
use self::dictionary::DictionaryConfig;
use self::network::NetworkConfig;
use self::output::OutputConfig;
use self::quality::QualityConfig;
use self::translator::TranslatorConfig;

pub mod batch;
pub mod dictionary;
pub mod network;
pub mod output;
pub mod quality;
pub mod translator;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub dictionary: DictionaryConfig,
    pub network: NetworkConfig,
    pub batch: BatchConfig,
    pub quality: QualityConfig,
    pub output: OutputConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl Config {
    /// Defaults, then the JSON file if given, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply `VOCAB_*` overrides from a variable lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = lookup("VOCAB_TRANSLATE_URL") {
            self.translator.api_url = url;
        }
        if let Some(url) = lookup("VOCAB_DICTIONARY_URL") {
            self.dictionary.api_url = url;
        }
        if let Some(name) = lookup("VOCAB_JS_CONST") {
            self.output.js_const = name;
        }
        if let Some(v) = parse_var(&lookup, "VOCAB_REQUEST_TIMEOUT_SECS")? {
            self.network.request_timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "VOCAB_BATCH_SIZE")? {
            self.batch.batch_size = v;
        }
        if let Some(v) = parse_var(&lookup, "VOCAB_FETCH_DELAY_MS")? {
            self.batch.fetch_delay_ms = v;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.batch_size == 0 {
            return Err(invalid("batch.batch_size", "0"));
        }
        if self.batch.max_in_flight == 0 {
            return Err(invalid("batch.max_in_flight", "0"));
        }
        if self.translator.max_attempts == 0 {
            return Err(invalid("translator.max_attempts", "0"));
        }
        if !(0.0..=1.0).contains(&self.quality.min_script_ratio) {
            return Err(invalid(
                "quality.min_script_ratio",
                &self.quality.min_script_ratio.to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(key, &raw)),
        None => Ok(None),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
