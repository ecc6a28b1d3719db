use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::FetchError;
use crate::types::{Dictionary, DictionaryEntry, ExampleLimits, extract_entry, parse_entries};

/// Client for the free dictionary REST API (`/entries/en/{word}`)
#[derive(Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    base_url: Url,
    limits: ExampleLimits,
}

impl FreeDictionaryClient {
    pub fn new(client: reqwest::Client, base_url: &str, limits: ExampleLimits) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            limits,
        })
    }

    /// Word appended as a single percent-encoded path segment
    pub fn entry_url(&self, word: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(word.trim());
        Ok(url)
    }
}

#[async_trait]
impl Dictionary for FreeDictionaryClient {
    async fn lookup(&self, word: &str) -> Result<Option<DictionaryEntry>, FetchError> {
        let url = self.entry_url(word)?;
        tracing::debug!("Dictionary lookup: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_transport(e.is_timeout(), e))?;

        // Unknown words come back as 404
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_transport(e.is_timeout(), e))?;
        let entries = parse_entries(&body)?;

        Ok(extract_entry(&entries, self.limits).filter(|entry| !entry.is_empty()))
    }

    fn name(&self) -> &str {
        "dictionaryapi.dev"
    }
}
