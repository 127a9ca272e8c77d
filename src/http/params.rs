//! Query-string access for the relay routes.
//!
//! The raw query is decoded as form pairs and never rejected. A repeated key
//! resolves to its first occurrence, so `?query=a&query=b` relays `a`.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Decoded `key=value` pairs in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs(pub Vec<(String, String)>);

impl QueryPairs {
    /// Decode a raw query string (without the leading `?`).
    pub fn parse(raw: &str) -> Self {
        Self(
            url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// First value for `key`, if present.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(parts.uri.query().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let pairs = QueryPairs::parse("query=select+1&format=csv&query=select+2");
        assert_eq!(pairs.first("query"), Some("select 1"));
        assert_eq!(pairs.first("format"), Some("csv"));
        assert_eq!(pairs.first("limit"), None);
    }

    #[test]
    fn test_malformed_input_is_decoded_leniently() {
        let pairs = QueryPairs::parse("query=%ZZ%E9&&=x&flag");
        assert_eq!(pairs.first("query"), Some("%ZZ\u{fffd}"));
        assert_eq!(pairs.first("flag"), Some(""));
    }

    #[tokio::test]
    async fn test_extractor_never_rejects() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/tap/sync?query=a&query=b&query=c")
            .body(())
            .unwrap()
            .into_parts();

        let pairs = QueryPairs::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(pairs.first("query"), Some("a"));
        assert_eq!(pairs.0.len(), 3);

        let (mut parts, _) = axum::http::Request::builder()
            .uri("/tap/sync")
            .body(())
            .unwrap()
            .into_parts();
        let pairs = QueryPairs::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(pairs, QueryPairs::default());
    }
}
