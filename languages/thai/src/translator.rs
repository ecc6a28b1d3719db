use async_trait::async_trait;
use serde_json::Value;
use vocab_translator::{FetchError, ProviderMetadata, Translation, Translator};

/// Keyless Google Translate endpoint (`translate_a/single?client=gtx`)
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, FetchError> {
        let params = [
            ("client", "gtx"),
            ("sl", from),
            ("tl", to),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchError::from_transport(e.is_timeout(), e))?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(format!("Failed to parse response: {}", e)))?;

        Ok(Translation {
            text: join_segments(&json)?,
            from: from.to_string(),
            to: to.to_string(),
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

/// The response looks like `[[["แปล", "translate", ...], ...], null, "en", ...]`;
/// the translation is the first element of every segment in the first array.
pub fn join_segments(json: &Value) -> Result<String, FetchError> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Parse("No translation segments in response".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    Ok(text.trim().to_string())
}
