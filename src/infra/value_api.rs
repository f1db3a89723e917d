//! Thin asynchronous client for the inventory valuation service.
//!
//! One `GET <base>/value/<identifier>` per request. The body is returned as
//! untyped JSON; shape handling belongs to the normalizer.

use reqwest::{header::ACCEPT, Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;

const USER_AGENT: &str = concat!("inventory-value-scanner/", env!("CARGO_PKG_VERSION"));
const VALUE_PATH: &str = "value/";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("base URL cannot carry path segments")]
    CannotBeABase,
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{}", status_message(.status, .reason, .body))]
    Status {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn status_message(status: &u16, reason: &str, body: &str) -> String {
    let mut message = format!("HTTP {status}");
    if !reason.is_empty() {
        message.push(' ');
        message.push_str(reason);
    }
    if !body.is_empty() {
        message.push_str(": ");
        message.push_str(body);
    }
    message
}

#[derive(Clone)]
pub struct ValueClient {
    http: Client,
    base_url: Url,
}

impl ValueClient {
    pub fn new() -> Result<Self, TransportError> {
        Self::from_config(&ApiConfig::from_env())
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, TransportError> {
        Self::with_base_url(&config.base_url)
    }

    pub fn with_base_url(base: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    /// Fetches the raw valuation payload for `identifier`.
    ///
    /// Fails on a non-2xx status (carrying the best-effort body text) or when
    /// the body is not JSON. No retries.
    pub async fn fetch_valuation(&self, identifier: &str) -> Result<Value, TransportError> {
        let url = self.value_url(identifier)?;
        debug!(%url, "requesting valuation");

        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "valuation request rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body: body.trim().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let payload = serde_json::from_slice(&bytes)?;
        debug!(%url, bytes = bytes.len(), "valuation payload received");
        Ok(payload)
    }

    /// Builds `<base>/value/<identifier>` with the identifier as one encoded segment.
    pub fn value_url(&self, identifier: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.join(VALUE_PATH)?;
        url.path_segments_mut()
            .map_err(|_| TransportError::CannotBeABase)?
            .pop_if_empty()
            .push(identifier);
        Ok(url)
    }
}
