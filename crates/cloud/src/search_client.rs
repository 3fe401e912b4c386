//! Async client for the place search service.
//!
//! Talks to a local search backend by default, or to any endpoint via
//! [`SearchEndpoint::Custom`].

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use placemap_core::{PlaceRecord, SearchQuery};

use crate::error::{CloudError, Result};
use crate::search_models::{SearchRequest, SearchResponse};

/// Environment variable overriding the default search endpoint.
pub const ENDPOINT_ENV: &str = "PLACEMAP_ENDPOINT";

// ---------------------------------------------------------------------------
// Search seam
// ---------------------------------------------------------------------------

/// Anything that can turn a query into place records.
///
/// [`SearchClient`] is the HTTP implementation; tests substitute their own.
pub trait PlaceSearch {
    fn find_places(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<PlaceRecord>>> + Send;
}

// ---------------------------------------------------------------------------
// Endpoint enum
// ---------------------------------------------------------------------------

/// Where the search service lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchEndpoint {
    /// The development backend at `http://127.0.0.1:8000`.
    #[default]
    Local,
    /// Any base URL, e.g. `"https://search.example.com/api"`.
    Custom(String),
}

impl SearchEndpoint {
    pub const LOCAL_BASE: &'static str = "http://127.0.0.1:8000";

    /// Return the full POST `/search` URL for this endpoint.
    pub fn search_url(&self) -> String {
        let base = match self {
            Self::Local => Self::LOCAL_BASE,
            Self::Custom(base) => base.as_str(),
        };
        let base = base.trim_end_matches('/');
        if base.ends_with("/search") {
            base.to_string()
        } else {
            format!("{}/search", base)
        }
    }

    /// Endpoint from `PLACEMAP_ENDPOINT`, or [`SearchEndpoint::Local`].
    pub fn from_env() -> Self {
        std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| Self::from_str_or_url(&s))
            .unwrap_or_default()
    }

    /// `"local"` selects [`SearchEndpoint::Local`]; anything else is a URL.
    pub fn from_str_or_url(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "local" | "localhost" => Self::Local,
            _ => Self::Custom(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for [`SearchClient`].
#[derive(Debug, Clone)]
pub struct SearchClientOptions {
    /// Transport-level request timeout (default 30 s). `None` leaves the
    /// bound to the caller.
    pub request_timeout: Option<Duration>,
}

impl Default for SearchClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Async client for `POST /search`.
///
/// Issues exactly one request per call; there is no retry.
pub struct SearchClient {
    endpoint: SearchEndpoint,
    client: reqwest::Client,
    options: SearchClientOptions,
}

impl SearchClient {
    pub fn new(endpoint: SearchEndpoint, options: SearchClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CloudError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint,
            client,
            options,
        })
    }

    pub fn options(&self) -> &SearchClientOptions {
        &self.options
    }

    pub fn endpoint(&self) -> &SearchEndpoint {
        &self.endpoint
    }

    /// Send the query and parse the response.
    ///
    /// A non-2xx status fails with the response body as the message; a
    /// transport failure fails with the transport message.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = self.endpoint.search_url();
        let body = SearchRequest::from(query);
        debug!(%url, category = %body.category, location = %body.location, "POST search");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CloudError::SearchRequestFailed(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CloudError::SearchRequestFailed(format!("reading response body: {e}")))?;

        if !status.is_success() {
            debug!(%status, "search endpoint returned an error");
            return Err(CloudError::SearchRequestFailed(text));
        }

        SearchResponse::from_body(&text)
    }
}

impl PlaceSearch for SearchClient {
    async fn find_places(&self, query: &SearchQuery) -> Result<Vec<PlaceRecord>> {
        Ok(self.search(query).await?.results)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_search_urls() {
        assert_eq!(SearchEndpoint::Local.search_url(), "http://127.0.0.1:8000/search");
        assert_eq!(
            SearchEndpoint::Custom("https://example.com/api".into()).search_url(),
            "https://example.com/api/search"
        );
        // Already has /search
        assert_eq!(
            SearchEndpoint::Custom("https://example.com/api/search".into()).search_url(),
            "https://example.com/api/search"
        );
        // Trailing slash
        assert_eq!(
            SearchEndpoint::Custom("https://example.com/api/".into()).search_url(),
            "https://example.com/api/search"
        );
    }

    #[test]
    fn endpoint_from_str_or_url() {
        assert_eq!(SearchEndpoint::from_str_or_url("local"), SearchEndpoint::Local);
        assert!(matches!(
            SearchEndpoint::from_str_or_url("http://10.0.0.2:9000"),
            SearchEndpoint::Custom(_)
        ));
    }
}
