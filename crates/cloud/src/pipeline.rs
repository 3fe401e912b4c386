//! One search cycle: search, geocode every result, filter, render.
//!
//! The geocode batch is fire-all / await-all. Each address gets its own
//! bounded wait, and a failure of any kind turns that place into an
//! unresolved entry instead of failing the batch.

use std::time::Duration;

use futures::stream::{FuturesOrdered, StreamExt};
use tracing::{debug, info, warn};

use placemap_core::{MarkerRenderer, PlaceRecord, RegionFilter, ResolvedPlace, SearchQuery};

use crate::error::{CloudError, GeocodeError, Result};
use crate::geocoder::Geocoder;
use crate::search_client::PlaceSearch;

/// Configuration for [`SearchPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Upper bound on the search call (default 30 s).
    pub search_timeout: Duration,
    /// Upper bound on each geocode call (default 10 s).
    pub geocode_timeout: Duration,
    /// Display policy applied after geocoding.
    pub filter: RegionFilter,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            search_timeout: Duration::from_secs(30),
            geocode_timeout: Duration::from_secs(10),
            filter: RegionFilter::default(),
        }
    }
}

/// Result of a completed cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// Every search result, in search order, resolved or not.
    pub resolved: Vec<ResolvedPlace>,
    /// The subset that is drawn.
    pub displayed: Vec<ResolvedPlace>,
}

impl SearchOutcome {
    pub fn unresolved_count(&self) -> usize {
        self.resolved.iter().filter(|p| !p.is_resolved()).count()
    }
}

/// The search, geocode and filter pipeline over injected collaborators.
pub struct SearchPipeline<S, G> {
    search: S,
    geocoder: G,
    options: PipelineOptions,
}

impl<S: PlaceSearch, G: Geocoder> SearchPipeline<S, G> {
    pub fn new(search: S, geocoder: G, options: PipelineOptions) -> Self {
        Self {
            search,
            geocoder,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Run the search call under `search_timeout`.
    pub async fn fetch_places(&self, query: &SearchQuery) -> Result<Vec<PlaceRecord>> {
        let limit = self.options.search_timeout;
        match tokio::time::timeout(limit, self.search.find_places(query)).await {
            Ok(result) => result,
            Err(_) => Err(CloudError::SearchTimeout(limit)),
        }
    }

    /// Geocode one record; never fails.
    pub async fn resolve_one(&self, record: PlaceRecord) -> ResolvedPlace {
        let limit = self.options.geocode_timeout;
        let result = match tokio::time::timeout(limit, self.geocoder.geocode(&record.address)).await
        {
            Ok(result) => result,
            Err(_) => Err(GeocodeError::Timeout(limit)),
        };

        match result {
            Ok(coord) => ResolvedPlace::resolved(record, coord),
            Err(e) => {
                debug!(address = %record.address, error = %e, "address left unresolved");
                ResolvedPlace::unresolved(record)
            }
        }
    }

    /// Geocode all records concurrently, keeping input order and length.
    pub async fn resolve_all(&self, records: Vec<PlaceRecord>) -> Vec<ResolvedPlace> {
        let mut futs = FuturesOrdered::new();
        let n = records.len();
        for record in records {
            futs.push_back(self.resolve_one(record));
        }

        let mut resolved = Vec::with_capacity(n);
        while let Some(place) = futs.next().await {
            resolved.push(place);
        }
        resolved
    }

    /// Search, resolve and filter without touching any display.
    pub async fn run(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        let records = self.fetch_places(query).await?;
        let resolved = self.resolve_all(records).await;
        let displayed = self.options.filter.apply(&resolved);

        let outcome = SearchOutcome {
            resolved,
            displayed,
        };
        info!(
            results = outcome.resolved.len(),
            unresolved = outcome.unresolved_count(),
            displayed = outcome.displayed.len(),
            "search cycle complete"
        );
        Ok(outcome)
    }

    /// Full cycle: on success the renderer's markers are replaced, on
    /// failure it receives one `"Search failed: ..."` notification and its
    /// markers are left alone.
    pub async fn run_cycle<R: MarkerRenderer>(
        &self,
        query: &SearchQuery,
        renderer: &mut R,
    ) -> Result<SearchOutcome> {
        match self.run(query).await {
            Ok(outcome) => {
                renderer.render_markers(&outcome.displayed);
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "search cycle aborted");
                renderer.report_error(&format!("Search failed: {e}"));
                Err(e)
            }
        }
    }
}
