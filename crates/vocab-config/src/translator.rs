use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "th".to_string()
}

fn default_api_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_reject_identity() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Total attempts per lookup, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// A translation equal to the input word counts as no translation
    #[serde(default = "default_reject_identity")]
    pub reject_identity: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_url: default_api_url(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            reject_identity: default_reject_identity(),
        }
    }
}

impl TranslatorConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
