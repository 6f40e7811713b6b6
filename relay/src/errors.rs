use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T, E = RelayError> = std::result::Result<T, E>;

/// The closed error taxonomy for one relay invocation.
///
/// Every variant has a total mapping to a response envelope (see
/// [`crate::envelope::Envelope`]); nothing escapes the invocation boundary
/// unclassified.
#[derive(Error, Debug)]
pub enum RelayError {
    /// A required endpoint URL is missing or empty.
    #[error("API URLs not configured")]
    UrlsNotConfigured,

    /// The source answered, but with an empty or null payload.
    #[error("no data returned by the source")]
    NoData,

    /// The remote answered with a non-success status line.
    #[error("remote returned {status}: {reason}")]
    Http { status: u16, reason: String },

    /// No HTTP response was obtained at all (DNS, refused, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] jobstore::StoreError),
}
