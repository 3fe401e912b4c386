//! Blocking (synchronous) API for native platforms.
//!
//! Wraps the async [`SearchPipeline`] with a Tokio runtime so callers (the
//! CLI, the GUI's worker threads) don't need to manage their own.

#[cfg(feature = "native")]
mod inner {
    use placemap_core::{MarkerRenderer, SearchQuery};

    use crate::error::{CloudError, Result};
    use crate::geocoder::{Geocoder, GeocoderOptions, GoogleGeocoder};
    use crate::pipeline::{PipelineOptions, SearchOutcome, SearchPipeline};
    use crate::search_client::{PlaceSearch, SearchClient, SearchClientOptions, SearchEndpoint};

    fn runtime() -> Result<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CloudError::Network(e.to_string()))
    }

    /// Blocking wrapper around [`SearchPipeline`].
    ///
    /// Uses an internal single-threaded Tokio runtime; the geocode batch is
    /// still concurrent on that one thread.
    pub struct SearchPipelineBlocking<S, G> {
        rt: tokio::runtime::Runtime,
        inner: SearchPipeline<S, G>,
    }

    impl<S: PlaceSearch, G: Geocoder> SearchPipelineBlocking<S, G> {
        pub fn new(pipeline: SearchPipeline<S, G>) -> Result<Self> {
            Ok(Self {
                rt: runtime()?,
                inner: pipeline,
            })
        }

        /// Search, resolve and filter (blocking).
        pub fn run(&self, query: &SearchQuery) -> Result<SearchOutcome> {
            self.rt.block_on(self.inner.run(query))
        }

        /// Full cycle into `renderer` (blocking).
        pub fn run_cycle<R: MarkerRenderer>(
            &self,
            query: &SearchQuery,
            renderer: &mut R,
        ) -> Result<SearchOutcome> {
            self.rt.block_on(self.inner.run_cycle(query, renderer))
        }

        pub fn pipeline(&self) -> &SearchPipeline<S, G> {
            &self.inner
        }
    }

    /// Build the HTTP search client and Google geocoder.
    ///
    /// The pipeline's `search_timeout` and `geocode_timeout` are the only
    /// bounds on each call; any transport timeout in `geocoder` is dropped.
    pub fn http_pipeline(
        endpoint: SearchEndpoint,
        geocoder: GeocoderOptions,
        options: PipelineOptions,
    ) -> Result<SearchPipeline<SearchClient, GoogleGeocoder>> {
        let search = SearchClient::new(
            endpoint,
            SearchClientOptions {
                request_timeout: None,
            },
        )?;
        let geocoder = GoogleGeocoder::new(GeocoderOptions {
            request_timeout: None,
            ..geocoder
        })?;
        Ok(SearchPipeline::new(search, geocoder, options))
    }

    /// One-shot: run a single cycle against the HTTP collaborators (blocking).
    pub fn run_search(
        endpoint: SearchEndpoint,
        geocoder: GeocoderOptions,
        options: PipelineOptions,
        query: &SearchQuery,
    ) -> Result<SearchOutcome> {
        SearchPipelineBlocking::new(http_pipeline(endpoint, geocoder, options)?)?.run(query)
    }
}

#[cfg(feature = "native")]
pub use inner::*;
