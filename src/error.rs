use thiserror::Error;

/// Error raised by a [`Transport`](crate::transport::Transport) implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a client call.
///
/// Backend-reported errors and undecodable bodies are not represented here:
/// they are collected into the [`Response`](crate::common::response::Response)
/// envelope so that pagination and batch loops keep going.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed to perform the HTTP call.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    /// A request payload could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured API root could not be parsed.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A chunk size of zero was requested.
    #[error("chunk size must be a positive integer")]
    InvalidChunkSize,

    /// The backend kept returning cursors past the configured page limit.
    #[error("pagination exceeded {pages} pages")]
    PaginationLimitExceeded {
        /// The page limit that was hit.
        pages: usize,
    },

    /// The backend returned the same cursor twice in a row.
    #[error("pagination cursor repeated: {0}")]
    RepeatedCursor(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
