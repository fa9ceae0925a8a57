//! Pluggable HTTP transports used to fetch the responses being primed.
//!
//! The crate ships with [`ReqwestTransport`] (requires the `reqwest`
//! feature). Implement the [`Transport`] trait to route requests through
//! your own client, or to substitute a mock in tests.

#[cfg(feature = "reqwest")]
mod reqwest;

#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestTransport;

use std::borrow::Cow;
use std::future::Future;

use encoding_rs::{Encoding, UTF_8};
use url::Url;

use crate::error::{PrimeCacheError, Result};

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Numeric HTTP status code (e.g. `200`, `404`).
    pub status: u16,

    /// Value of the `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response without a `Content-Type`; the body is read as UTF-8.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// Set the `Content-Type` header value, e.g. `text/plain; charset=iso-8859-1`.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Decode the body as text.
    ///
    /// A byte order mark wins over the declared charset and is stripped.
    /// Otherwise the `charset` parameter of the content type is used, and
    /// UTF-8 when it is missing or not a known encoding label. Malformed
    /// input is an error rather than being replaced.
    pub fn text(&self) -> Result<String> {
        let (encoding, body) = match Encoding::for_bom(&self.body) {
            Some((encoding, bom_len)) => (encoding, &self.body[bom_len..]),
            None => (self.declared_encoding().unwrap_or(UTF_8), &self.body[..]),
        };

        encoding
            .decode_without_bom_handling_and_without_replacement(body)
            .map(Cow::into_owned)
            .ok_or_else(|| PrimeCacheError::InvalidBody {
                encoding: encoding.name(),
            })
    }

    fn declared_encoding(&self) -> Option<&'static Encoding> {
        let content_type: mime::Mime = self.content_type.as_deref()?.parse().ok()?;
        let charset = content_type.get_param(mime::CHARSET)?;
        Encoding::for_label(charset.as_str().trim_matches('"').as_bytes())
    }
}

/// Trait for transports that can perform a single HTTP GET.
///
/// # Implementing a custom transport
///
/// ```rust,no_run
/// use cache_primer::{Result, Transport, TransportResponse};
/// use url::Url;
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn get(&self, _url: &Url) -> Result<TransportResponse> {
///         Ok(TransportResponse::new(200, "[]"))
///     }
/// }
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Issue a GET request to `url` and buffer the whole response.
    ///
    /// Any status code is a successful response; only failures to obtain a
    /// response at all are errors.
    fn get(&self, url: &Url) -> impl Future<Output = Result<TransportResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_type_is_utf8() {
        let response = TransportResponse::new(200, "caf\u{e9}");
        assert_eq!(response.text().unwrap(), "caf\u{e9}");
    }

    #[test]
    fn latin1_charset_is_honored() {
        let response = TransportResponse::new(200, b"caf\xE9".to_vec())
            .with_content_type("text/plain; charset=iso-8859-1");
        assert_eq!(response.text().unwrap(), "caf\u{e9}");
    }

    #[test]
    fn quoted_charset_is_honored() {
        let response = TransportResponse::new(200, b"\xA4".to_vec())
            .with_content_type(r#"text/html; charset="ISO-8859-15""#);
        assert_eq!(response.text().unwrap(), "\u{20ac}");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let response = TransportResponse::new(200, b"\xEF\xBB\xBF{\"a\":1}".to_vec())
            .with_content_type("application/json; charset=utf-8");
        assert_eq!(response.text().unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn bom_overrides_declared_charset() {
        let response = TransportResponse::new(200, b"\xFF\xFEh\x00i\x00".to_vec())
            .with_content_type("text/plain; charset=iso-8859-1");
        assert_eq!(response.text().unwrap(), "hi");
    }

    #[test]
    fn unknown_charset_falls_back_to_utf8() {
        let response =
            TransportResponse::new(200, "ok").with_content_type("text/plain; charset=klingon");
        assert_eq!(response.text().unwrap(), "ok");
    }

    #[test]
    fn malformed_utf8_is_an_error() {
        let err = TransportResponse::new(200, b"\xC3\x28".to_vec())
            .text()
            .unwrap_err();
        assert!(matches!(err, PrimeCacheError::InvalidBody { encoding: "UTF-8" }));
    }
}
