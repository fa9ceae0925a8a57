//! The inbound request a priming call is resolved against.

use url::Url;

use crate::error::Result;

/// Read-only view of the inbound request currently being rendered.
///
/// Every component is expected to be URL-encoded already, the way a web
/// framework exposes them. `path_base` is the mount point of the
/// application (empty when mounted at the root).
///
/// # Example
///
/// ```
/// use cache_primer::RequestBase;
///
/// let base = RequestBase::new("https", "example.com")
///     .path_base("/app")
///     .path("/page")
///     .query_string("?x=1");
///
/// assert_eq!(base.to_uri_string(), "https://example.com/app/page?x=1");
/// assert_eq!(
///     base.resolve("data").unwrap().as_str(),
///     "https://example.com/app/data"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBase {
    scheme: String,
    host: String,
    path_base: String,
    path: String,
    query_string: String,
}

impl RequestBase {
    /// Create a base from the request scheme and host (with optional port).
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            ..Self::default()
        }
    }

    /// Mount point of the application, e.g. `/app`.
    pub fn path_base(mut self, path_base: impl Into<String>) -> Self {
        self.path_base = path_base.into();
        self
    }

    /// Request path below the mount point, e.g. `/page`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Query string. A leading `?` is added when missing.
    pub fn query_string(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query_string = if query.is_empty() || query.starts_with('?') {
            query
        } else {
            format!("?{query}")
        };
        self
    }

    /// The absolute URL of the inbound request as a plain string:
    /// `scheme://host` followed by path base, path and query string.
    pub fn to_uri_string(&self) -> String {
        [
            self.scheme.as_str(),
            "://",
            self.host.as_str(),
            self.path_base.as_str(),
            self.path.as_str(),
            self.query_string.as_str(),
        ]
        .concat()
    }

    /// Parse [`to_uri_string`](Self::to_uri_string) into a [`Url`].
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.to_uri_string())?)
    }

    /// Resolve a URL reference against this base using RFC 3986 rules.
    ///
    /// Absolute references replace the base entirely.
    pub fn resolve(&self, reference: &str) -> Result<Url> {
        Ok(self.base_url()?.join(reference)?)
    }
}
