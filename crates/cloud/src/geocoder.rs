//! Address to coordinate resolution.
//!
//! [`GoogleGeocoder`] calls the Google Geocoding web API. One call resolves
//! one address; results are not cached and failures are not retried.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::trace;

use placemap_core::Coord;

use crate::error::{CloudError, GeocodeError, Result};

/// Environment variable holding the map service credential.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Resolve one free-text address to its best-match coordinate.
pub trait Geocoder {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = std::result::Result<Coord, GeocodeError>> + Send;
}

/// Configuration for [`GoogleGeocoder`].
#[derive(Debug, Clone)]
pub struct GeocoderOptions {
    /// Map service credential. Without one the geocoder is not ready.
    pub api_key: Option<String>,
    /// Geocoding JSON endpoint.
    pub base_url: String,
    /// Transport-level request timeout (default 10 s). `None` leaves the
    /// bound to the caller.
    pub request_timeout: Option<Duration>,
}

impl GeocoderOptions {
    pub const GOOGLE_GEOCODE_URL: &'static str =
        "https://maps.googleapis.com/maps/api/geocode/json";

    /// Defaults with the credential taken from `GOOGLE_MAPS_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl Default for GeocoderOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::GOOGLE_GEOCODE_URL.to_string(),
            request_timeout: Some(Duration::from_secs(10)),
        }
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Geocoding API response, reduced to what is needed for a point lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResponse {
    /// First result's location, or the failure status.
    pub fn best_match(&self) -> std::result::Result<Coord, GeocodeError> {
        if self.status != "OK" {
            return Err(GeocodeError::Failed {
                status: self.status.clone(),
            });
        }
        self.results
            .first()
            .map(|r| Coord::new(r.geometry.location.lat, r.geometry.location.lng))
            .ok_or_else(|| GeocodeError::Failed {
                status: "ZERO_RESULTS".to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Geocoder backed by the Google Geocoding web API.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    options: GeocoderOptions,
}

impl GoogleGeocoder {
    pub fn new(options: GeocoderOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CloudError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, options })
    }

    pub fn options(&self) -> &GeocoderOptions {
        &self.options
    }

    /// Whether a credential is configured.
    pub fn is_ready(&self) -> bool {
        self.options.api_key.is_some()
    }
}

impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> std::result::Result<Coord, GeocodeError> {
        let Some(key) = self.options.api_key.as_deref() else {
            return Err(GeocodeError::Unavailable);
        };

        let resp = self
            .client
            .get(&self.options.base_url)
            .query(&[("address", address), ("key", key)])
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodeError::Transport(format!("HTTP {}", status)));
        }

        let body: GeocodeResponse = resp
            .json()
            .await
            .map_err(|e| GeocodeError::Transport(format!("parsing geocode response: {e}")))?;

        trace!(address, status = %body.status, results = body.results.len(), "geocode response");
        body.best_match()
    }
}
