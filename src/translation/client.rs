use crate::error::TranslationError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// The external per-string translation call.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Get the backend name (e.g., "http")
    fn backend_name(&self) -> &str;

    /// Translate `text` from `source` (or `auto`) into `target`, both already
    /// mapped to endpoint codes.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

/// GET-based translation endpoint (`client`, `sl`, `tl`, `dt=t`, `q`).
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
    client_id: String,
}

impl HttpTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpTranslator {
            client,
            endpoint: endpoint.into(),
            client_id: client_id.into(),
        })
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslator {
    fn backend_name(&self) -> &str {
        "http"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", self.client_id.as_str()),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        debug!("{:?}", body);
        parse_translation(&body)
    }
}

/// Accepts `{"translation": "..."}` or the nested array shape
/// `[[["segment", "original", ...], ...], ...]`.
pub(crate) fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    if let Some(translation) = body.get("translation").and_then(Value::as_str) {
        if !translation.is_empty() {
            return Ok(translation.to_string());
        }
        return Err(TranslationError::MalformedResponse);
    }

    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or(TranslationError::MalformedResponse)?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        Err(TranslationError::MalformedResponse)
    } else {
        Ok(translated)
    }
}
