//! # PlaceMap Cloud
//!
//! Network side of the PlaceMap viewer: a client for the place search
//! service, a geocoder for the Google Geocoding web API, and the async
//! pipeline that joins them.
//!
//! One search cycle issues a single `POST /search`, geocodes every returned
//! address concurrently (a failed address becomes an unresolved place rather
//! than failing the batch), applies the optional region filter and hands the
//! result to a [`MarkerRenderer`](placemap_core::MarkerRenderer).
//!
//! ## Features
//!
//! - `native` (default): blocking API via a Tokio `block_on`

pub mod error;
pub mod geocoder;
pub mod pipeline;
pub mod search_client;
pub mod search_models;

pub mod sync_api;

pub use error::{CloudError, GeocodeError, Result};
pub use geocoder::{Geocoder, GeocoderOptions, GoogleGeocoder};
pub use pipeline::{PipelineOptions, SearchOutcome, SearchPipeline};
pub use search_client::{PlaceSearch, SearchClient, SearchClientOptions, SearchEndpoint};
pub use search_models::{SearchRequest, SearchResponse};

/// Blocking API re-exported as `blocking` module (native only).
#[cfg(feature = "native")]
pub mod blocking {
    pub use crate::sync_api::*;
}
