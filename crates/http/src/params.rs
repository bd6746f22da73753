//! Permissive query-parameter parsing.
//!
//! Missing, empty, zero, negative or non-numeric ids are treated as absent
//! rather than rejected, so a malformed filter is simply left out. A key given
//! more than once keeps its last value.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, Uri},
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Query extractor that never rejects a request.
///
/// Parameters are collected last-value-wins and deserialized into `T`; a
/// query string that still does not fit `T` yields `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct LenientQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for LenientQuery<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parse_query(&parts.uri)))
    }
}

/// Decode the query string of `uri` into `T`, last value per key.
pub fn parse_query<T>(uri: &Uri) -> T
where
    T: DeserializeOwned + Default,
{
    let pairs = match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::debug!(error = %e, "unreadable query string ignored");
            Vec::new()
        }
    };

    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.insert(key, Value::String(value));
    }

    serde_json::from_value(Value::Object(fields)).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "query parameters ignored");
        T::default()
    })
}

/// Deserialize an optional positive id from a query-string value.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_id))
}

/// Parse a positive integer, ignoring surrounding whitespace.
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Params {
        #[serde(default)]
        s: Option<String>,
        #[serde(default, deserialize_with = "lenient_id")]
        id: Option<u64>,
    }

    fn parse(uri: &str) -> Params {
        parse_query(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse("/books?id=42").id, Some(42));
    }

    #[test]
    fn treats_malformed_values_as_absent() {
        assert_eq!(parse("/books").id, None);
        assert_eq!(parse("/books?id=").id, None);
        assert_eq!(parse("/books?id=abc").id, None);
        assert_eq!(parse("/books?id=0").id, None);
        assert_eq!(parse("/books?id=-3").id, None);
        assert_eq!(parse("/books?id=99999999999999999999999").id, None);
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let params = parse("/books?id=4&s=a&id=5&s=dune+messiah");
        assert_eq!(params.id, Some(5));
        assert_eq!(params.s.as_deref(), Some("dune messiah"));

        assert_eq!(parse("/books?id=7&id=abc").id, None);
    }

    #[test]
    fn search_is_decoded_but_not_trimmed() {
        assert_eq!(parse("/books?s=dune%20").s.as_deref(), Some("dune "));
        assert_eq!(parse("/books?s=").s.as_deref(), Some(""));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = parse("/books?page=2&perPage=5&id=3");
        assert_eq!(params.id, Some(3));
        assert!(params.s.is_none());
    }
}
