//! Reqwest-backed client implementing the `UserApi` port; maps reqwest
//! errors/statuses into coarse `FetchError` kinds.
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::model::{ApiConfig, FetchError};
use crate::ports::http::UserApi;

pub struct RandomUserClient {
    client: reqwest::Client,
    base_url: String,
}

/// Response envelope; the record array lives under `results`. A body without
/// the key (the API's answer to `results=0`) decodes as an empty batch.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    results: Vec<Value>,
}

impl RandomUserClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(std::time::Duration::from_secs(cfg.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.url.clone(),
        })
    }

    fn classify_error(e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Unexpected(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl UserApi for RandomUserClient {
    async fn fetch_users(&self, count: u64) -> Result<Vec<Value>, FetchError> {
        debug!(url = %self.base_url, count, "HTTP GET start");
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("results", count)])
            .send()
            .await
            .map_err(Self::classify_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: ApiEnvelope = resp.json().await.map_err(Self::classify_error)?;
        debug!(received = envelope.results.len(), "HTTP GET done");
        Ok(envelope.results)
    }
}
