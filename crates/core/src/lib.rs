//! # PlaceMap Core
//!
//! Core types and map state for the PlaceMap search-and-pin viewer.
//!
//! This crate provides:
//! - `Coord` / `GeoRegion`: WGS-84 points and closed bounding boxes
//! - `PlaceRecord` / `ResolvedPlace`: search results before and after geocoding
//! - `RegionFilter`: the optional bounding-box display policy
//! - `MapViewer`: marker set, popup selection and search state of the map
//! - `MarkerRenderer`: the seam a search pipeline draws through
//!
//! Nothing here performs I/O; network collaborators live in `placemap-cloud`.

pub mod error;
pub mod filter;
pub mod geo;
pub mod markers;
pub mod place;
pub mod session;
pub mod viewer;

pub use error::{Error, Result};
pub use filter::RegionFilter;
pub use geo::{Coord, GeoRegion};
pub use markers::{Marker, MarkerLayer};
pub use place::{PlaceRecord, ResolvedPlace, SearchQuery};
pub use session::{AutoSearch, SearchSession, SearchState};
pub use viewer::{MapView, MapViewer};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::filter::RegionFilter;
    pub use crate::geo::{Coord, GeoRegion};
    pub use crate::place::{PlaceRecord, ResolvedPlace, SearchQuery};
    pub use crate::viewer::MapViewer;
    pub use crate::MarkerRenderer;
}

/// Receiver of the outcome of one search cycle.
///
/// A pipeline calls exactly one of these per cycle. Implementations own the
/// displayed marker set and must replace it wholesale on `render_markers`.
pub trait MarkerRenderer {
    /// Replace the displayed markers with `places`.
    ///
    /// Places without coordinates are never drawn.
    fn render_markers(&mut self, places: &[ResolvedPlace]);

    /// Surface a failed cycle to the user. The marker set is left as is.
    fn report_error(&mut self, message: &str);
}
