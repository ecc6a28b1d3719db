use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use vocab_config::Config;
use vocab_core::cleanup::CosmeticCleaner;
use vocab_core::sanitize::DEFAULT_CONTAMINATION;
use vocab_core::{Denylist, OverrideTable, QualityClassifier, QualityPolicy, Sanitizer, ScriptProfile};
use vocab_dictionary::{Dictionary, ExampleLimits, FreeDictionaryClient};
use vocab_lang_thai::{GoogleTranslator, ThaiScript};
use vocab_translator::{RetryPolicy, TranslationFetcher, Translator};

/// Everything a pass needs, built once at start-up
pub struct AppState {
    pub config: Config,
    pub overrides: Arc<OverrideTable>,
    pub classifier: Arc<QualityClassifier>,
    pub cleaner: Arc<CosmeticCleaner>,
    pub translator: TranslationFetcher,
    pub dictionary: Arc<dyn Dictionary>,
}

impl AppState {
    pub fn new(
        config: Config,
        overrides: OverrideTable,
        denylist: Denylist,
        script: Arc<dyn ScriptProfile>,
        translator: Arc<dyn Translator>,
        dictionary: Arc<dyn Dictionary>,
    ) -> Self {
        let policy = QualityPolicy {
            max_length: config.quality.max_length,
            min_script_ratio: config.quality.min_script_ratio,
        };

        let contamination = DEFAULT_CONTAMINATION
            .iter()
            .map(|s| s.to_string())
            .chain(config.quality.extra_contamination.iter().cloned())
            .collect();

        let classifier = QualityClassifier::new(policy, script.clone(), Arc::new(denylist));
        let cleaner = CosmeticCleaner::new(
            Sanitizer::new(contamination),
            script,
            config.quality.truncate_over,
        );

        let retry = RetryPolicy {
            max_attempts: config.translator.max_attempts,
            backoff: config.translator.retry_backoff(),
        };
        let translator = TranslationFetcher::new(
            translator,
            config.translator.from_lang.clone(),
            config.translator.to_lang.clone(),
            retry,
        )
        .reject_identity(config.translator.reject_identity);

        Self {
            config,
            overrides: Arc::new(overrides),
            classifier: Arc::new(classifier),
            cleaner: Arc::new(cleaner),
            translator,
            dictionary,
        }
    }

    /// Wire up the live HTTP providers for the configured endpoints
    pub fn from_config(config: Config, overrides: OverrideTable, denylist: Denylist) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.network.request_timeout())
            .user_agent(config.network.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        let translator = GoogleTranslator::new(client.clone(), config.translator.api_url.clone());
        let dictionary = FreeDictionaryClient::new(
            client,
            &config.dictionary.api_url,
            ExampleLimits {
                max_examples: config.dictionary.max_examples,
                max_len: config.dictionary.max_example_len,
            },
        )
        .context("Invalid dictionary URL")?;

        tracing::info!(
            "Providers: {} ({} -> {}), {}",
            translator.metadata().name,
            config.translator.from_lang,
            config.translator.to_lang,
            dictionary.name()
        );

        Ok(Self::new(
            config,
            overrides,
            denylist,
            Arc::new(ThaiScript),
            Arc::new(translator),
            Arc::new(dictionary),
        ))
    }
}

/// Override table from an explicit file, the configured file, or the built-in set
pub fn load_overrides(cli_path: Option<&Path>, config: &Config) -> anyhow::Result<OverrideTable> {
    match cli_path.or(config.quality.overrides_path.as_deref().map(Path::new)) {
        Some(path) => OverrideTable::load_from_file(path)
            .with_context(|| format!("Failed to load overrides from {}", path.display())),
        None => Ok(vocab_lang_thai::default_overrides()),
    }
}

pub fn load_denylist(cli_path: Option<&Path>, config: &Config) -> anyhow::Result<Denylist> {
    match cli_path.or(config.quality.denylist_path.as_deref().map(Path::new)) {
        Some(path) => Denylist::load_from_file(path)
            .with_context(|| format!("Failed to load denylist from {}", path.display())),
        None => Ok(vocab_lang_thai::default_denylist()),
    }
}
