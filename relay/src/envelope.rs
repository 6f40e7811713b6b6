use crate::errors::RelayError;
use serde::Serialize;
use serde_json::{Value, json};

/// The `{statusCode, body}` pair returned by every invocation path.
///
/// `body` is itself a JSON-encoded string, matching the proxy-integration
/// response shape the invocation trigger expects.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub body: String,
}

impl Envelope {
    /// Envelope for a completed relay: the sink's status and parsed body.
    pub fn ok(status: u16, body: &Value) -> Result<Self, serde_json::Error> {
        Ok(Envelope {
            status_code: status,
            body: serde_json::to_string(body)?,
        })
    }

    fn error(status: u16, message: &str) -> Self {
        Envelope {
            status_code: status,
            body: json!({ "error": message }).to_string(),
        }
    }
}

/// Total mapping from the error taxonomy to response envelopes.
///
/// Unclassified failures (JSON parse, store) collapse to a fixed message so
/// no internal detail leaks to the caller; the detail goes to the log at the
/// invocation boundary instead.
impl From<&RelayError> for Envelope {
    fn from(err: &RelayError) -> Self {
        match err {
            RelayError::UrlsNotConfigured => Envelope::error(500, "API URLs not configured"),
            RelayError::NoData => Envelope::error(404, "No data found"),
            RelayError::Http { status, reason } => Envelope::error(*status, reason),
            RelayError::Transport(reason) => Envelope::error(500, reason),
            RelayError::Json(_) | RelayError::Store(_) => {
                Envelope::error(500, "Internal server error")
            }
        }
    }
}
