use crate::errors::RelayError;
use http::StatusCode;
use http::header;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Timeout applied to each outbound call, covering connection establishment
/// through body collection.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Thin JSON client shared by the GET and POST steps.
///
/// Each call is attempted exactly once; retries are the caller's problem
/// (and this system deliberately has none).
pub struct RelayClient {
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new() -> Result<Self, RelayError> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(RelayClient { client })
    }

    /// GET the source endpoint and parse its body as JSON.
    ///
    /// An empty body parses to `Value::Null`, which the orchestrator treats
    /// the same as an explicit JSON `null`: no data.
    pub async fn get_json(&self, url: &str) -> Result<Value, RelayError> {
        let url = parse_url(url)?;
        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status));
        }

        let bytes = response.bytes().await.map_err(transport)?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// POST a JSON payload to the sink; return its status and parsed body.
    ///
    /// The payload is the re-serialized form of whatever the source
    /// returned, so formatting may differ from the source's raw bytes.
    pub async fn post_json(&self, url: &str, payload: &Value) -> Result<(u16, Value), RelayError> {
        let url = parse_url(url)?;
        let body = serde_json::to_vec(payload)?;

        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status));
        }

        let bytes = response.bytes().await.map_err(transport)?;
        let value = serde_json::from_slice(&bytes)?;
        Ok((status.as_u16(), value))
    }
}

fn parse_url(url: &str) -> Result<Url, RelayError> {
    Url::parse(url).map_err(|e| RelayError::Transport(format!("invalid URL {url}: {e}")))
}

fn transport(err: reqwest::Error) -> RelayError {
    RelayError::Transport(err.to_string())
}

fn http_error(status: StatusCode) -> RelayError {
    RelayError::Http {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("HTTP error")
            .to_string(),
    }
}
