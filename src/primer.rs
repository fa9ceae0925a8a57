//! The priming operation itself.

use std::sync::Arc;

use crate::error::{PrimeCacheError, Result};
use crate::logger::WarnSink;
use crate::request::RequestBase;
use crate::script::{PrimeOutcome, PrimedResponse};
use crate::transport::Transport;

/// Fetches responses during server-side rendering and turns them into
/// cache-priming script fragments.
///
/// Created through [`CachePrimerBuilder`](crate::CachePrimerBuilder). A
/// primer holds no per-call state and can be shared between concurrent
/// renders behind an [`Arc`]. Identical URLs are not deduplicated: every
/// call issues its own request.
pub struct CachePrimer<T: Transport> {
    transport: T,
    logger: Option<Arc<dyn WarnSink>>,
    global: String,
}

impl<T: Transport> CachePrimer<T> {
    pub(crate) fn new(transport: T, logger: Option<Arc<dyn WarnSink>>, global: String) -> Self {
        Self {
            transport,
            logger,
            global,
        }
    }

    /// The transport requests are issued through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch `url`, resolved against `base`, and return the outcome.
    ///
    /// Returns [`PrimeCacheError::InvalidArgument`] without touching the
    /// network if `url` is empty. Every other failure is written to the
    /// configured warning sink and reported as [`PrimeOutcome::Failed`].
    pub async fn prime(&self, base: &RequestBase, url: &str) -> Result<PrimeOutcome> {
        if url.is_empty() {
            return Err(PrimeCacheError::InvalidArgument("url"));
        }

        let rendered = self.fetch(base, url).await.and_then(|response| {
            let script = response.to_script_with(&self.global)?;
            Ok((response, script))
        });

        let outcome = match rendered {
            Ok((response, script)) => {
                tracing::debug!(
                    "Primed {url} with status {} ({} bytes)",
                    response.status_code,
                    response.body.len()
                );
                PrimeOutcome::Primed { response, script }
            }
            Err(error) => {
                if let Some(logger) = &self.logger {
                    logger.warn(url, &error);
                }
                PrimeOutcome::Failed {
                    url: url.to_string(),
                    error,
                }
            }
        };

        Ok(outcome)
    }

    /// Fetch `url` and render the fragment to embed in the page.
    ///
    /// The result is empty when the fetch failed.
    pub async fn prime_cache(&self, base: &RequestBase, url: &str) -> Result<String> {
        Ok(self.prime(base, url).await?.render())
    }

    /// Prime several URLs concurrently and concatenate their fragments in
    /// input order.
    ///
    /// All URLs are checked before any request is made; a single empty URL
    /// fails the whole call with [`PrimeCacheError::InvalidArgument`].
    pub async fn prime_all<S: AsRef<str>>(&self, base: &RequestBase, urls: &[S]) -> Result<String> {
        if urls.iter().any(|url| url.as_ref().is_empty()) {
            return Err(PrimeCacheError::InvalidArgument("urls"));
        }

        let futs = urls.iter().map(|url| self.prime(base, url.as_ref()));
        let outcomes = futures::future::join_all(futs).await;

        outcomes
            .into_iter()
            .map(|outcome| outcome.map(|o| o.render()))
            .collect()
    }

    async fn fetch(&self, base: &RequestBase, url: &str) -> Result<PrimedResponse> {
        let target = base.resolve(url)?;
        let response = self.transport.get(&target).await?;
        let body = response.text()?;

        Ok(PrimedResponse {
            url: url.to_string(),
            status_code: response.status,
            body,
        })
    }
}
