//! Error types for the `cache_primer` crate.

/// All errors that can occur while priming the client-side response cache.
///
/// Only [`InvalidArgument`](PrimeCacheError::InvalidArgument) is returned to
/// callers of [`CachePrimer::prime`](crate::CachePrimer::prime). The fetch
/// errors are logged and folded into
/// [`PrimeOutcome::Failed`](crate::PrimeOutcome::Failed).
#[derive(Debug, thiserror::Error)]
pub enum PrimeCacheError {
    /// A required argument was missing or empty.
    #[error("Value cannot be null or empty: {0}")]
    InvalidArgument(&'static str),

    /// The request base or the resolved URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The transport failed to complete the GET request.
    #[error("Transport failed: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The response body cannot be decoded with its character encoding.
    #[error("Response body is not valid {encoding}")]
    InvalidBody { encoding: &'static str },

    /// The cache entry could not be serialized into the script.
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The builder configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, PrimeCacheError>`.
pub type Result<T> = std::result::Result<T, PrimeCacheError>;
