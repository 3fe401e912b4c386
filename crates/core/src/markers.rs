//! Displayed marker set and the single open popup.

use serde::Serialize;

use crate::geo::Coord;
use crate::place::{PlaceRecord, ResolvedPlace};

/// A place that can be drawn: it always has coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(flatten)]
    pub record: PlaceRecord,
    #[serde(flatten)]
    pub coord: Coord,
}

impl Marker {
    /// `None` for places without usable coordinates.
    pub fn from_place(place: &ResolvedPlace) -> Option<Self> {
        place.coord().map(|coord| Self {
            record: place.record.clone(),
            coord,
        })
    }
}

/// The current markers plus at most one selected marker.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    selected: Option<usize>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every existing marker and the popup, then draw `places`.
    pub fn replace(&mut self, places: &[ResolvedPlace]) {
        self.selected = None;
        self.markers.clear();
        self.markers.extend(places.iter().filter_map(Marker::from_place));
    }

    /// Open the popup for marker `idx`, closing any other.
    ///
    /// Out-of-range indices leave the selection unchanged.
    pub fn select(&mut self, idx: usize) -> Option<&Marker> {
        if idx < self.markers.len() {
            self.selected = Some(idx);
        }
        self.selected()
    }

    pub fn close_popup(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.selected.and_then(|i| self.markers.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(title: &str, coord: Option<Coord>) -> ResolvedPlace {
        ResolvedPlace {
            record: PlaceRecord::new(title, "addr", "uri"),
            coord,
        }
    }

    #[test]
    fn replace_skips_unresolved() {
        let mut layer = MarkerLayer::new();
        layer.replace(&[
            place("a", Some(Coord::new(42.0, -72.5))),
            place("b", None),
        ]);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.markers()[0].record.title, "a");
    }

    #[test]
    fn replace_does_not_accumulate() {
        let places = [
            place("a", Some(Coord::new(42.0, -72.5))),
            place("b", Some(Coord::new(42.1, -72.6))),
        ];
        let mut layer = MarkerLayer::new();
        layer.replace(&places);
        layer.replace(&places);
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn replace_closes_popup() {
        let mut layer = MarkerLayer::new();
        layer.replace(&[place("a", Some(Coord::new(42.0, -72.5)))]);
        layer.select(0);
        layer.replace(&[place("b", Some(Coord::new(42.0, -72.5)))]);
        assert!(layer.selected().is_none());
    }

    #[test]
    fn at_most_one_popup() {
        let mut layer = MarkerLayer::new();
        layer.replace(&[
            place("a", Some(Coord::new(42.0, -72.5))),
            place("b", Some(Coord::new(42.1, -72.6))),
        ]);
        assert_eq!(layer.select(0).map(|m| m.record.title.as_str()), Some("a"));
        assert_eq!(layer.select(1).map(|m| m.record.title.as_str()), Some("b"));
        assert_eq!(layer.selected_index(), Some(1));

        layer.close_popup();
        assert!(layer.selected().is_none());
    }

    #[test]
    fn out_of_range_select_is_ignored() {
        let mut layer = MarkerLayer::new();
        layer.replace(&[place("a", Some(Coord::new(42.0, -72.5)))]);
        layer.select(0);
        assert_eq!(layer.select(7).map(|m| m.record.title.as_str()), Some("a"));
    }
}
