use thiserror::Error;

/// Failure of a single HTTP GET, as reported by an [`crate::api::HttpGet`] transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Connection, DNS, TLS or timeout failure. No response was received.
    #[error("{0}")]
    Network(String),
}

/// Why a country query produced no result set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("not found")]
    NotFound,

    #[error("API returned HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(404) => FetchError::NotFound,
            TransportError::Status(code) => FetchError::Status(code),
            TransportError::Network(msg) => FetchError::Transport(msg),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// Rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("empty query")]
    EmptyQuery,
}

/// Failure of the flag sub-step. Local to the flag, never fails a render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("failed to download flag: {0}")]
    Fetch(#[from] TransportError),

    #[error("failed to decode flag image: {0}")]
    Decode(String),
}

impl From<image::ImageError> for FlagError {
    fn from(err: image::ImageError) -> Self {
        FlagError::Decode(err.to_string())
    }
}
