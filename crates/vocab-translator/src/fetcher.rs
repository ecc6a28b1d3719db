use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::{FetchError, LanguageCode, Translator};

/// Bounded retry with a fixed pause between attempts
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds or attempts run out; returns the last error
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts => {
                    tracing::debug!("{label}: attempt {attempt}/{attempts} failed: {e}");
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Word-level translation lookup on top of a [`Translator`]
#[derive(Clone)]
pub struct TranslationFetcher {
    translator: Arc<dyn Translator>,
    from: LanguageCode,
    to: LanguageCode,
    retry: RetryPolicy,
    reject_identity: bool,
}

impl TranslationFetcher {
    pub fn new(
        translator: Arc<dyn Translator>,
        from: impl Into<LanguageCode>,
        to: impl Into<LanguageCode>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            translator,
            from: from.into(),
            to: to.into(),
            retry,
            reject_identity: false,
        }
    }

    /// Treat a translation equal to the input (ignoring case) as no result
    pub fn reject_identity(mut self, reject: bool) -> Self {
        self.reject_identity = reject;
        self
    }

    /// Best-effort translation of one word or phrase.
    ///
    /// `Ok(None)` means the provider answered but had nothing usable.
    pub async fn fetch(&self, word: &str) -> Result<Option<String>, FetchError> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(None);
        }

        let translation = self
            .retry
            .run(word, move || self.translator.translate(word, &self.from, &self.to))
            .await?;

        let text = translation.text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if self.reject_identity && text.to_lowercase() == word.to_lowercase() {
            tracing::debug!("Translation of '{word}' is the word itself, ignoring");
            return Ok(None);
        }

        Ok(Some(text.to_string()))
    }
}
