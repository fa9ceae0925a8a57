//! # cache_primer
//!
//! Prime a browser-side response cache from server-rendered pages.
//!
//! ## Overview
//!
//! While a page is rendered on the server, [`CachePrimer`] fetches an API URL
//! (resolved against the inbound request), and emits an inline `<script>`
//! that stores the response under `window.__preCachedResponses[url]`. Client
//! code that later fetches the same URL can be served from that table
//! instead of making a second request.
//!
//! Failures never break the page: they are written to a [`WarnSink`]
//! (`tracing` by default) and render as the empty string. The only error
//! returned to the caller is [`PrimeCacheError::InvalidArgument`] for an
//! empty URL.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use cache_primer::{CachePrimerBuilder, ReqwestTransport, RequestBase};
//!
//! # async fn example() -> cache_primer::Result<()> {
//! let primer = CachePrimerBuilder::new(ReqwestTransport::new()).build()?;
//!
//! let base = RequestBase::new("https", "example.com")
//!     .path_base("/app")
//!     .path("/orders")
//!     .query_string("?page=2");
//!
//! // Either a `<script>...</script>` fragment or "" if the fetch failed.
//! let fragment = primer.prime_cache(&base, "/api/orders?page=2").await?;
//! # let _ = fragment;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `reqwest` | **yes** | Enables [`ReqwestTransport`]. |
//! | `rustls-tls` | **yes** | Use `rustls` for HTTPS in `reqwest`. |

pub mod config;
pub mod error;
pub mod logger;
pub mod primer;
pub mod request;
pub mod script;
pub mod transport;

pub use config::CachePrimerBuilder;
pub use error::{PrimeCacheError, Result};
pub use logger::{TracingSink, WarnSink};
pub use primer::CachePrimer;
pub use request::RequestBase;
pub use script::{DEFAULT_GLOBAL_NAME, PrimeOutcome, PrimedResponse};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{Transport, TransportResponse};
