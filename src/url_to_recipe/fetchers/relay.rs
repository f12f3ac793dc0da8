use crate::error::ImportError;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeIngest/1.0)";

/// JSON envelope returned by the relay
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    #[serde(default)]
    contents: Option<String>,
}

/// Fetches pages through a relay endpoint (`GET {relay}?url=...`) that answers
/// with `{ "contents": "<html>" }`.
pub struct RelayFetcher {
    client: Client,
    relay_url: String,
}

impl RelayFetcher {
    pub fn new(relay_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ImportError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            relay_url: relay_url.into(),
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        debug!("RelayFetcher: fetching {} via {}", url, self.relay_url);
        let response = self
            .client
            .get(&self.relay_url)
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::RelayStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: RelayEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.contents.unwrap_or_default())
    }
}
