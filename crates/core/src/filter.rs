//! Region display policy.

use serde::{Deserialize, Serialize};

use crate::geo::GeoRegion;
use crate::place::ResolvedPlace;

/// Which resolved places are eligible for display.
///
/// Every policy rejects places without coordinates. `Bounded` additionally
/// requires the coordinates to lie inside the closed region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RegionFilter {
    /// Show every place that has coordinates.
    Disabled,
    /// Show only places inside the region.
    Bounded(GeoRegion),
}

impl RegionFilter {
    pub fn accepts(&self, place: &ResolvedPlace) -> bool {
        let Some(coord) = place.coord() else {
            return false;
        };
        match self {
            Self::Disabled => true,
            Self::Bounded(region) => region.contains(coord),
        }
    }

    /// Keep the accepted places, preserving order.
    pub fn apply(&self, places: &[ResolvedPlace]) -> Vec<ResolvedPlace> {
        places.iter().filter(|p| self.accepts(p)).cloned().collect()
    }

    pub fn region(&self) -> Option<&GeoRegion> {
        match self {
            Self::Disabled => None,
            Self::Bounded(region) => Some(region),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Bounded(_))
    }
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self::Bounded(GeoRegion::WESTERN_MASSACHUSETTS)
    }
}

impl From<Option<GeoRegion>> for RegionFilter {
    fn from(region: Option<GeoRegion>) -> Self {
        region.map_or(Self::Disabled, Self::Bounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coord;
    use crate::place::PlaceRecord;

    fn at(lat: f64, lng: f64) -> ResolvedPlace {
        ResolvedPlace::resolved(PlaceRecord::new("p", "a", "u"), Coord::new(lat, lng))
    }

    #[test]
    fn deserialized_filter_rejects_inverted_region() {
        let f: RegionFilter = serde_json::from_str(
            r#"{"Bounded":{"min_lat":41.9,"max_lat":42.9,"min_lng":-73.6,"max_lng":-72.0}}"#,
        )
        .unwrap();
        assert_eq!(f, RegionFilter::default());

        let bad = serde_json::from_str::<RegionFilter>(
            r#"{"Bounded":{"min_lat":41.9,"max_lat":42.9,"min_lng":-72.0,"max_lng":-73.6}}"#,
        );
        assert!(bad.is_err());
    }

    fn unresolved() -> ResolvedPlace {
        ResolvedPlace::unresolved(PlaceRecord::new("p", "a", "u"))
    }

    #[test]
    fn unresolved_places_are_always_rejected() {
        assert!(!RegionFilter::Disabled.accepts(&unresolved()));
        assert!(!RegionFilter::default().accepts(&unresolved()));
    }

    #[test]
    fn disabled_filter_accepts_anywhere() {
        assert!(RegionFilter::Disabled.accepts(&at(40.0, -72.52)));
        assert!(RegionFilter::Disabled.accepts(&at(-33.9, 151.2)));
    }

    #[test]
    fn bounded_filter_checks_region() {
        let f = RegionFilter::default();
        assert!(f.accepts(&at(42.37, -72.52)));
        assert!(!f.accepts(&at(40.0, -72.52)));
        assert!(f.accepts(&at(42.90, -72.00)));
    }

    #[test]
    fn apply_preserves_order() {
        let places = vec![at(42.1, -72.6), unresolved(), at(40.0, -72.0), at(42.8, -73.5)];
        let kept = RegionFilter::default().apply(&places);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], places[0]);
        assert_eq!(kept[1], places[3]);
    }

    #[test]
    fn from_optional_region() {
        assert_eq!(RegionFilter::from(None), RegionFilter::Disabled);
        assert!(RegionFilter::from(Some(GeoRegion::WESTERN_MASSACHUSETTS)).is_enabled());
    }
}
