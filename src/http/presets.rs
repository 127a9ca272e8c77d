//! Canned exoplanet queries.
//!
//! Each route builds a fixed ADQL statement and hands it to the relay with
//! `format=json`. An optional `limit` adds a `TOP n` clause.

use axum::{extract::State, http::HeaderMap, response::Response};

use crate::error::RelayError;
use crate::http::params::QueryPairs;
use crate::http::relay::relay;
use crate::http::request::request_id_of;
use crate::http::server::AppState;
use crate::upstream::TapRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Confirmed planets from the Planetary Systems table.
    Confirmed,
    /// KOI candidates from the cumulative table.
    Candidates,
    /// KOI false positives from the cumulative table.
    FalsePositives,
}

impl Preset {
    /// ADQL for this preset. A zero limit means no limit.
    pub fn adql(self, limit: Option<u32>) -> String {
        let top = match limit {
            Some(n) if n > 0 => format!("TOP {n} "),
            _ => String::new(),
        };

        match self {
            Preset::Confirmed => format!("SELECT {top}* FROM ps"),
            Preset::Candidates => {
                format!("SELECT {top}* FROM cumulative WHERE koi_disposition = 'CANDIDATE'")
            }
            Preset::FalsePositives => {
                format!("SELECT {top}* FROM cumulative WHERE koi_disposition = 'FALSE POSITIVE'")
            }
        }
    }
}

/// Parse the raw `limit` value. Empty is treated as absent.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<u32>, RelayError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| RelayError::InvalidLimit(value.to_string())),
    }
}

async fn run_preset(
    state: AppState,
    preset: Preset,
    pairs: QueryPairs,
    headers: HeaderMap,
) -> Result<Response, RelayError> {
    let request_id = request_id_of(&headers);
    let limit = parse_limit(pairs.first("limit"))?;
    let request = TapRequest::json(preset.adql(limit));

    tracing::debug!(request_id = %request_id, preset = ?preset, ?limit, "Running preset query");
    relay(&state, &request, &request_id).await
}

/// `GET /exoplanets/confirmed`
pub async fn confirmed(
    State(state): State<AppState>,
    headers: HeaderMap,
    pairs: QueryPairs,
) -> Result<Response, RelayError> {
    run_preset(state, Preset::Confirmed, pairs, headers).await
}

/// `GET /exoplanets/candidates`
pub async fn candidates(
    State(state): State<AppState>,
    headers: HeaderMap,
    pairs: QueryPairs,
) -> Result<Response, RelayError> {
    run_preset(state, Preset::Candidates, pairs, headers).await
}

/// `GET /exoplanets/false-positives`
pub async fn false_positives(
    State(state): State<AppState>,
    headers: HeaderMap,
    pairs: QueryPairs,
) -> Result<Response, RelayError> {
    run_preset(state, Preset::FalsePositives, pairs, headers).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adql_without_limit() {
        assert_eq!(Preset::Confirmed.adql(None), "SELECT * FROM ps");
        assert_eq!(
            Preset::Candidates.adql(Some(0)),
            "SELECT * FROM cumulative WHERE koi_disposition = 'CANDIDATE'"
        );
    }

    #[test]
    fn test_adql_with_limit() {
        assert_eq!(Preset::Confirmed.adql(Some(25)), "SELECT TOP 25 * FROM ps");
        assert_eq!(
            Preset::FalsePositives.adql(Some(3)),
            "SELECT TOP 3 * FROM cumulative WHERE koi_disposition = 'FALSE POSITIVE'"
        );
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None).unwrap(), None);
        assert_eq!(parse_limit(Some("")).unwrap(), None);
        assert_eq!(parse_limit(Some(" 10 ")).unwrap(), Some(10));

        let err = parse_limit(Some("ten")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid limit parameter: ten");

        assert!(parse_limit(Some("-1")).is_err());
    }

    #[test]
    fn test_repeated_limit_uses_first() {
        let pairs = QueryPairs::parse("limit=1&limit=2");
        assert_eq!(parse_limit(pairs.first("limit")).unwrap(), Some(1));
    }
}
