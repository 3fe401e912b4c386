//! Wire types for the place search service.
//!
//! The service takes `{category, location}` and answers
//! `{results: [{title, address, maps_uri}, ...]}`. Parsing is lenient: a
//! missing or non-array `results` is an empty list and entries that are not
//! objects are dropped.

use serde::{Deserialize, Serialize};

use placemap_core::{PlaceRecord, SearchQuery};

use crate::error::{CloudError, Result};

/// Body for `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub category: String,
    pub location: String,
}

impl From<&SearchQuery> for SearchRequest {
    fn from(q: &SearchQuery) -> Self {
        Self {
            category: q.category.clone(),
            location: q.location.clone(),
        }
    }
}

/// Parsed search response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub results: Vec<PlaceRecord>,
}

impl SearchResponse {
    /// Parse a 2xx response body.
    ///
    /// Fails only if the body is not JSON at all.
    pub fn from_body(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| CloudError::SearchRequestFailed(format!("parsing search response: {e}")))?;

        let results = value
            .get("results")
            .and_then(|r| r.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.is_object())
                    .filter_map(|e| serde_json::from_value::<PlaceRecord>(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(SearchRequest::from(&SearchQuery::default())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "category": "pediatrician",
                "location": "Western Massachusetts, MA",
            })
        );
    }

    #[test]
    fn parses_results() {
        let r = SearchResponse::from_body(
            r#"{"results":[{"title":"Dr. A","address":"1 Main St, Amherst, MA","maps_uri":"https://m/a"}]}"#,
        )
        .unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.results[0].title, "Dr. A");
        assert_eq!(r.results[0].maps_uri, "https://m/a");
    }

    #[test]
    fn missing_results_is_empty() {
        assert!(SearchResponse::from_body("{}").unwrap().is_empty());
    }

    #[test]
    fn non_array_results_is_empty() {
        assert!(SearchResponse::from_body(r#"{"results":"nope"}"#).unwrap().is_empty());
        assert!(SearchResponse::from_body(r#"{"results":null}"#).unwrap().is_empty());
    }

    #[test]
    fn non_object_entries_are_dropped() {
        let r = SearchResponse::from_body(r#"{"results":[1,"x",{"title":"ok"}]}"#).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.results[0].title, "ok");
    }

    #[test]
    fn null_fields_keep_the_entry() {
        let r = SearchResponse::from_body(
            r#"{"results":[
                {"title":"Dr. A","address":"1 Main St, Amherst, MA","maps_uri":null},
                {"title":null,"address":"2 Elm St, Northampton, MA"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.results[0].address, "1 Main St, Amherst, MA");
        assert_eq!(r.results[0].maps_uri, "");
        assert_eq!(r.results[1].title, "");
    }

    #[test]
    fn not_json_is_an_error() {
        assert!(matches!(
            SearchResponse::from_body("<html>"),
            Err(CloudError::SearchRequestFailed(_))
        ));
    }
}
