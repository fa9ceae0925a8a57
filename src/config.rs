//! Builder for configuring a [`CachePrimer`].

use std::sync::Arc;

use crate::error::{PrimeCacheError, Result};
use crate::logger::{TracingSink, WarnSink};
use crate::primer::CachePrimer;
use crate::script::DEFAULT_GLOBAL_NAME;
use crate::transport::Transport;

/// Builder for configuring and creating a [`CachePrimer`].
///
/// Provides a fluent API for the warning sink and the name of the global
/// dictionary the rendered scripts write into.
///
/// # Example
///
/// ```rust,no_run
/// use cache_primer::{CachePrimerBuilder, ReqwestTransport};
///
/// let primer = CachePrimerBuilder::new(ReqwestTransport::new())
///     .logger(|url: &str, err: &cache_primer::PrimeCacheError| {
///         eprintln!("could not prime {url}: {err}");
///     })
///     .global_name("__preCachedResponses")
///     .build()
///     .unwrap();
/// ```
pub struct CachePrimerBuilder<T: Transport> {
    transport: T,
    logger: Option<Arc<dyn WarnSink>>,
    global_name: String,
}

impl<T: Transport> CachePrimerBuilder<T> {
    /// Create a new builder around the given transport.
    ///
    /// Defaults: failures are logged through [`TracingSink`], scripts write
    /// into `window.__preCachedResponses`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            logger: Some(Arc::new(TracingSink)),
            global_name: DEFAULT_GLOBAL_NAME.to_string(),
        }
    }

    /// Send priming failures to `sink` instead of `tracing`.
    pub fn logger(mut self, sink: impl WarnSink + 'static) -> Self {
        self.logger = Some(Arc::new(sink));
        self
    }

    /// Share an existing sink with other primers.
    pub fn shared_logger(mut self, sink: Arc<dyn WarnSink>) -> Self {
        self.logger = Some(sink);
        self
    }

    /// Drop priming failures silently.
    pub fn without_logger(mut self) -> Self {
        self.logger = None;
        self
    }

    /// Name of the `window` property the rendered scripts populate.
    ///
    /// Must be a valid JavaScript identifier, checked by
    /// [`build`](Self::build).
    pub fn global_name(mut self, name: impl Into<String>) -> Self {
        self.global_name = name.into();
        self
    }

    /// Validate the configuration and create the [`CachePrimer`].
    pub fn build(self) -> Result<CachePrimer<T>> {
        if !is_js_identifier(&self.global_name) {
            return Err(PrimeCacheError::Config(format!(
                "global name {:?} is not a valid JavaScript identifier",
                self.global_name
            )));
        }

        Ok(CachePrimer::new(self.transport, self.logger, self.global_name))
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
