//! Map renderer state: viewport, markers, popup and the search action.

use tracing::{debug, warn};

use crate::error::Result;
use crate::geo::Coord;
use crate::markers::{Marker, MarkerLayer};
use crate::place::ResolvedPlace;
use crate::session::{SearchSession, SearchState};
use crate::MarkerRenderer;

/// Initial viewport of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coord,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coord::new(42.25, -72.65),
            zoom: 9.0,
        }
    }
}

/// Everything the map shows, owned in one place.
///
/// The marker set and the popup are only ever replaced by a completed cycle
/// (`render_markers`) or by user selection; a failed cycle adds a
/// notification and changes nothing else.
#[derive(Debug, Clone, Default)]
pub struct MapViewer {
    view: MapView,
    layer: MarkerLayer,
    session: SearchSession,
    notifications: Vec<String>,
}

impl MapViewer {
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Start a cycle. Fails if one is already running.
    ///
    /// Starting a cycle closes the popup, as the old one would point at a
    /// marker that is about to be replaced.
    pub fn begin_search(&mut self) -> Result<()> {
        self.session.begin()?;
        self.layer.close_popup();
        Ok(())
    }

    pub fn finish_search(&mut self) {
        self.session.finish();
    }

    pub fn search_state(&self) -> SearchState {
        self.session.state()
    }

    pub fn is_searching(&self) -> bool {
        self.session.is_searching()
    }

    pub fn completed_cycles(&self) -> u64 {
        self.session.completed_cycles()
    }

    pub fn select(&mut self, idx: usize) -> Option<&Marker> {
        self.layer.select(idx)
    }

    pub fn close_popup(&mut self) {
        self.layer.close_popup();
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.layer.selected()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.layer.selected_index()
    }

    pub fn markers(&self) -> &[Marker] {
        self.layer.markers()
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Hand pending notifications to the caller, clearing them.
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }
}

impl MarkerRenderer for MapViewer {
    fn render_markers(&mut self, places: &[ResolvedPlace]) {
        self.layer.replace(places);
        debug!(markers = self.layer.len(), "markers replaced");
    }

    fn report_error(&mut self, message: &str) {
        warn!("{}", message);
        self.notifications.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::place::PlaceRecord;

    fn amherst() -> ResolvedPlace {
        ResolvedPlace::resolved(
            PlaceRecord::new("Dr. A", "1 Main St, Amherst, MA", "https://maps.example/a"),
            Coord::new(42.37, -72.52),
        )
    }

    #[test]
    fn default_view_is_western_ma() {
        let v = MapView::default();
        assert_eq!(v.center, Coord::new(42.25, -72.65));
        assert_eq!(v.zoom, 9.0);
    }

    #[test]
    fn error_keeps_markers() {
        let mut viewer = MapViewer::default();
        viewer.render_markers(&[amherst()]);
        viewer.report_error("Search failed: db down");

        assert_eq!(viewer.markers().len(), 1);
        assert_eq!(viewer.notifications(), ["Search failed: db down"]);
        assert_eq!(viewer.take_notifications().len(), 1);
        assert!(viewer.notifications().is_empty());
    }

    #[test]
    fn begin_search_closes_popup_and_rejects_reentry() {
        let mut viewer = MapViewer::default();
        viewer.render_markers(&[amherst()]);
        viewer.select(0);

        viewer.begin_search().unwrap();
        assert!(viewer.selected().is_none());
        assert!(matches!(viewer.begin_search(), Err(Error::SearchInProgress)));

        viewer.finish_search();
        assert_eq!(viewer.search_state(), SearchState::Idle);
        assert_eq!(viewer.completed_cycles(), 1);
    }
}
