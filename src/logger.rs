//! Sinks that receive the warning written when priming a URL fails.

use crate::error::PrimeCacheError;

/// Receiver for priming failures.
///
/// Called exactly once per failed priming call. Implementations must not
/// panic; the call is fire-and-forget.
pub trait WarnSink: Send + Sync {
    /// Record that priming `url` failed with `error`.
    fn warn(&self, url: &str, error: &PrimeCacheError);
}

/// Default sink that forwards failures to `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarnSink for TracingSink {
    fn warn(&self, url: &str, error: &PrimeCacheError) {
        tracing::warn!(url, %error, "Error priming cache for URL: {url}");
    }
}

impl<F> WarnSink for F
where
    F: Fn(&str, &PrimeCacheError) + Send + Sync,
{
    fn warn(&self, url: &str, error: &PrimeCacheError) {
        self(url, error)
    }
}
