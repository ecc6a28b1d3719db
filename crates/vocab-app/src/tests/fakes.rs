//! In-memory providers and state builders for pass tests

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vocab_config::Config;
use vocab_core::{Denylist, FetchError, OverrideTable, ScriptRange, VocabularyRecord};
use vocab_dictionary::{Dictionary, DictionaryEntry};
use vocab_translator::{ProviderMetadata, Translation, Translator};

use crate::passes::SnapshotSink;
use crate::state::AppState;

type CallHook = Box<dyn Fn(&str) + Send + Sync>;

/// Answers from a fixed table; unknown words get a generic Thai answer
#[derive(Default)]
pub struct FakeTranslator {
    answers: HashMap<String, Result<String, FetchError>>,
    on_call: Option<CallHook>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, word: &str, text: &str) -> Self {
        self.answers.insert(word.to_string(), Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, word: &str) -> Self {
        self.answers.insert(
            word.to_string(),
            Err(FetchError::Transport("connection refused".into())),
        );
        self
    }

    /// Run `hook` with the word before answering
    pub fn on_call(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_call = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<Translation, FetchError> {
        self.calls.lock().unwrap().push(text.to_string());
        if let Some(hook) = &self.on_call {
            hook(text);
        }
        let answer = self
            .answers
            .get(text)
            .cloned()
            .unwrap_or_else(|| Ok("คำแปล".to_string()))?;

        Ok(Translation {
            text: answer,
            from: from.to_string(),
            to: to.to_string(),
            provider: "fake".into(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".into(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

/// Every word has the same entry, except failing or hanging ones
#[derive(Default)]
pub struct FakeDictionary {
    failing: HashSet<String>,
    hang: bool,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, word: &str) -> Self {
        self.failing.insert(word.to_string());
        self
    }

    /// Never answer, like a stalled request
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    /// Hold every lookup open for `delay` so overlapping calls can be counted
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    /// Most lookups that were running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Dictionary for FakeDictionary {
    async fn lookup(&self, word: &str) -> Result<Option<DictionaryEntry>, FetchError> {
        self.calls.lock().unwrap().push(word.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        if self.failing.contains(word) {
            return Err(FetchError::Timeout);
        }

        Ok(Some(DictionaryEntry {
            reading: Some(format!("/{word}/")),
            examples: vec![format!("An example with {word}.")],
        }))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Default config with every pause and backoff set to zero
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.batch.fetch_delay_ms = 0;
    config.batch.batch_pause_ms = 0;
    config.translator.retry_backoff_ms = 0;
    config
}

pub fn state_with(
    config: Config,
    overrides: &[(&str, &str)],
    denylist: &[&str],
    translator: Arc<FakeTranslator>,
    dictionary: Arc<FakeDictionary>,
) -> AppState {
    AppState::new(
        config,
        OverrideTable::from_pairs(overrides.iter().copied()),
        Denylist::from_words(denylist.iter().copied()),
        Arc::new(ScriptRange::new("th", vec!['\u{0E00}'..='\u{0E7F}'])),
        translator,
        dictionary,
    )
}

pub fn sink_in(dir: &Path) -> SnapshotSink {
    SnapshotSink {
        output: dir.join("data.json"),
        js: Some((dir.join("data.js"), "OXFORD_DATA".to_string())),
        checkpoint: Some(dir.join("progress.json")),
    }
}

/// Put a directory where the output's temp file goes, so the next save fails
pub fn block_output(output: &Path) {
    let mut name = output.file_name().unwrap().to_os_string();
    name.push(".tmp");
    std::fs::create_dir_all(output.with_file_name(name)).unwrap();
}

pub fn record(word: &str, translate: Option<&str>) -> VocabularyRecord {
    let mut record = VocabularyRecord::new(word);
    record.translate = translate.map(str::to_string);
    record
}

/// Record with every field the fill pass looks at already present
pub fn complete_record(word: &str) -> VocabularyRecord {
    let mut record = record(word, Some("ครบ"));
    record.reading = Some(format!("/{word}/"));
    record.examples = vec![format!("Already has {word}.")];
    record
}
