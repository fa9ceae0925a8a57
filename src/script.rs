//! Rendering of primed responses into inline `<script>` fragments.
//!
//! A primed response becomes a single script element that, when run by the
//! browser, stores `{statusCode, body}` in a global dictionary keyed by the
//! URL the page asked for:
//!
//! ```text
//! <script>window.__preCachedResponses=window.__preCachedResponses||{},window.__preCachedResponses["/api/data"]={"statusCode":200,"body":"{\"a\":1}"};</script>
//! ```
//!
//! All values are JSON-encoded with `<`, `>`, `&`, U+2028 and U+2029
//! written as `\uXXXX` escapes, so a body containing `</script>` cannot end
//! the element early. The escaped text is still plain JSON and decodes back
//! to the original strings.

use std::fmt;

use serde::Serialize;

use crate::error::{PrimeCacheError, Result};

/// Name of the global dictionary the client-side fetch layer reads from.
pub const DEFAULT_GLOBAL_NAME: &str = "__preCachedResponses";

/// A response fetched during rendering, ready to be embedded in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimedResponse {
    /// The URL exactly as passed by the caller (not the resolved URL).
    pub url: String,

    /// Numeric HTTP status code.
    pub status_code: u16,

    /// Response body decoded as text.
    pub body: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry<'a> {
    status_code: u16,
    body: &'a str,
}

impl PrimedResponse {
    /// Render the script element using the default global name.
    pub fn to_script(&self) -> Result<String> {
        self.to_script_with(DEFAULT_GLOBAL_NAME)
    }

    /// Render the script element storing the entry in `window.<global>`.
    ///
    /// `global` is written verbatim and must be a valid JavaScript
    /// identifier; the builder checks this before it gets here.
    pub fn to_script_with(&self, global: &str) -> Result<String> {
        let key = script_safe_json(&self.url)?;
        let entry = script_safe_json(&CacheEntry {
            status_code: self.status_code,
            body: &self.body,
        })?;

        Ok(format!(
            "<script>window.{global}=window.{global}||{{}},window.{global}[{key}]={entry};</script>"
        ))
    }
}

/// The result of one priming call.
///
/// Rendering a [`Failed`](PrimeOutcome::Failed) outcome produces nothing, so
/// the page renders as if the call had not been made.
#[derive(Debug)]
pub enum PrimeOutcome {
    /// The response was fetched and can be embedded.
    Primed {
        /// The fetched response.
        response: PrimedResponse,
        /// The rendered `<script>` element.
        script: String,
    },

    /// Fetching failed; the warning has already been written.
    Failed {
        /// The URL as passed by the caller.
        url: String,
        /// Why the response could not be primed.
        error: PrimeCacheError,
    },
}

impl PrimeOutcome {
    /// Returns `true` if the response was fetched.
    pub fn is_primed(&self) -> bool {
        matches!(self, PrimeOutcome::Primed { .. })
    }

    /// The primed response, if any.
    pub fn response(&self) -> Option<&PrimedResponse> {
        match self {
            PrimeOutcome::Primed { response, .. } => Some(response),
            PrimeOutcome::Failed { .. } => None,
        }
    }

    /// Render the fragment: a script element, or the empty string on failure.
    pub fn render(&self) -> String {
        match self {
            PrimeOutcome::Primed { script, .. } => script.clone(),
            PrimeOutcome::Failed { .. } => String::new(),
        }
    }
}

impl fmt::Display for PrimeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimeOutcome::Primed { script, .. } => f.write_str(script),
            PrimeOutcome::Failed { .. } => Ok(()),
        }
    }
}

/// Serialize `value` as JSON that is safe to inline inside a `<script>`.
fn script_safe_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primed(url: &str, status_code: u16, body: &str) -> PrimedResponse {
        PrimedResponse {
            url: url.into(),
            status_code,
            body: body.into(),
        }
    }

    #[test]
    fn renders_exact_script_for_json_body() {
        let script = primed("/api/data", 200, r#"{"a":1}"#).to_script().unwrap();
        assert_eq!(
            script,
            r#"<script>window.__preCachedResponses=window.__preCachedResponses||{},window.__preCachedResponses["/api/data"]={"statusCode":200,"body":"{\"a\":1}"};</script>"#
        );
    }

    #[test]
    fn script_closing_tag_in_body_is_escaped() {
        let script = primed("/x", 200, "</script><script>alert(1)</script>")
            .to_script()
            .unwrap();
        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.ends_with("</script>"));
        assert!(script.contains(r"\u003c/script\u003e\u003cscript\u003ealert(1)"));
    }

    #[test]
    fn html_in_url_is_escaped() {
        let script = primed("/search?q=<b>&x=1", 200, "").to_script().unwrap();
        assert!(script.contains(r#"["/search?q=\u003cb\u003e\u0026x=1"]"#));
    }

    #[test]
    fn line_separators_are_escaped() {
        let json = script_safe_json("a\u{2028}b\u{2029}c").unwrap();
        assert_eq!(json, r#""a\u2028b\u2029c""#);
    }

    #[test]
    fn escaped_json_decodes_to_original() {
        let body = "quote \" backslash \\ <tag> & </script> \u{2028} ünïcødé 🚀\n";
        let json = script_safe_json(body).unwrap();
        let decoded: String = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn custom_global_name() {
        let script = primed("/a", 404, "nope").to_script_with("__cache").unwrap();
        assert_eq!(
            script,
            r#"<script>window.__cache=window.__cache||{},window.__cache["/a"]={"statusCode":404,"body":"nope"};</script>"#
        );
    }

    #[test]
    fn failed_outcome_renders_nothing() {
        let outcome = PrimeOutcome::Failed {
            url: "/a".into(),
            error: PrimeCacheError::Config("x".into()),
        };
        assert!(!outcome.is_primed());
        assert!(outcome.response().is_none());
        assert_eq!(outcome.render(), "");
        assert_eq!(outcome.to_string(), "");
    }

    #[test]
    fn primed_outcome_displays_script() {
        let response = primed("/a", 200, "ok");
        let script = response.to_script().unwrap();
        let outcome = PrimeOutcome::Primed {
            response,
            script: script.clone(),
        };
        assert!(outcome.is_primed());
        assert_eq!(outcome.render(), script);
        assert_eq!(outcome.to_string(), script);
    }

    #[test]
    fn unserializable_value_is_an_error() {
        // JSON object keys must be strings
        let value = std::collections::HashMap::from([((1u8, 2u8), 3u8)]);
        let err = script_safe_json(&value).unwrap_err();
        assert!(matches!(err, PrimeCacheError::Serialize(_)));
    }
}
