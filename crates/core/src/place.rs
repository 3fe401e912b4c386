//! Search results before and after coordinate resolution.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::geo::Coord;

/// One entry returned by the search service.
///
/// Identity is positional; two records with equal fields are still distinct
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    /// External link to the place on a maps site.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub maps_uri: String,
}

/// Missing and `null` string fields both read as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl PlaceRecord {
    pub fn new(
        title: impl Into<String>,
        address: impl Into<String>,
        maps_uri: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            address: address.into(),
            maps_uri: maps_uri.into(),
        }
    }
}

/// A [`PlaceRecord`] merged with its geocode result.
///
/// Serializes flat as `{title, address, maps_uri, lat, lng}` where `lat` and
/// `lng` are `null` if the address could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FlatPlace", into = "FlatPlace")]
pub struct ResolvedPlace {
    pub record: PlaceRecord,
    pub coord: Option<Coord>,
}

impl ResolvedPlace {
    pub fn resolved(record: PlaceRecord, coord: Coord) -> Self {
        Self {
            record,
            coord: Some(coord),
        }
    }

    pub fn unresolved(record: PlaceRecord) -> Self {
        Self {
            record,
            coord: None,
        }
    }

    /// Coordinates if both are present and finite.
    pub fn coord(&self) -> Option<Coord> {
        self.coord.filter(Coord::is_finite)
    }

    pub fn is_resolved(&self) -> bool {
        self.coord().is_some()
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }
}

#[derive(Serialize, Deserialize)]
struct FlatPlace {
    #[serde(flatten)]
    record: PlaceRecord,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

impl From<FlatPlace> for ResolvedPlace {
    fn from(flat: FlatPlace) -> Self {
        let coord = match (flat.lat, flat.lng) {
            (Some(lat), Some(lng)) => Some(Coord::new(lat, lng)),
            _ => None,
        };
        Self {
            record: flat.record,
            coord,
        }
    }
}

impl From<ResolvedPlace> for FlatPlace {
    fn from(place: ResolvedPlace) -> Self {
        Self {
            record: place.record,
            lat: place.coord.map(|c| c.lat),
            lng: place.coord.map(|c| c.lng),
        }
    }
}

/// What to search for and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub category: String,
    pub location: String,
}

impl SearchQuery {
    pub const DEFAULT_CATEGORY: &'static str = "pediatrician";
    pub const DEFAULT_LOCATION: &'static str = "Western Massachusetts, MA";

    /// Build a query; both parts must be non-blank.
    pub fn new(category: impl Into<String>, location: impl Into<String>) -> Result<Self> {
        let category = category.into();
        let location = location.into();
        if category.trim().is_empty() {
            return Err(Error::invalid("category", &category, "must not be empty"));
        }
        if location.trim().is_empty() {
            return Err(Error::invalid("location", &location, "must not be empty"));
        }
        Ok(Self { category, location })
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            category: Self::DEFAULT_CATEGORY.to_string(),
            location: Self::DEFAULT_LOCATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dr_a() -> PlaceRecord {
        PlaceRecord::new("Dr. A", "1 Main St, Amherst, MA", "https://maps.example/a")
    }

    #[test]
    fn unresolved_serializes_null_coordinates() {
        let v = serde_json::to_value(ResolvedPlace::unresolved(dr_a())).unwrap();
        assert_eq!(
            v,
            json!({
                "title": "Dr. A",
                "address": "1 Main St, Amherst, MA",
                "maps_uri": "https://maps.example/a",
                "lat": null,
                "lng": null,
            })
        );
    }

    #[test]
    fn resolved_serializes_flat() {
        let v = serde_json::to_value(ResolvedPlace::resolved(dr_a(), Coord::new(42.37, -72.52)))
            .unwrap();
        assert_eq!(v["lat"], json!(42.37));
        assert_eq!(v["lng"], json!(-72.52));
        assert_eq!(v["title"], json!("Dr. A"));
    }

    #[test]
    fn half_missing_coordinates_are_unresolved() {
        let p: ResolvedPlace =
            serde_json::from_value(json!({"title": "x", "lat": 42.0, "lng": null})).unwrap();
        assert!(!p.is_resolved());
    }

    #[test]
    fn record_fields_default_to_empty() {
        let r: PlaceRecord = serde_json::from_value(json!({"title": "Only title"})).unwrap();
        assert_eq!(r.address, "");
        assert_eq!(r.maps_uri, "");
    }

    #[test]
    fn null_record_fields_read_as_empty() {
        let r: PlaceRecord = serde_json::from_value(
            json!({"title": "Dr. A", "address": null, "maps_uri": null}),
        )
        .unwrap();
        assert_eq!(r, PlaceRecord::new("Dr. A", "", ""));

        let p: ResolvedPlace =
            serde_json::from_value(json!({"title": null, "address": "a", "lat": 1.0, "lng": 2.0}))
                .unwrap();
        assert_eq!(p.title(), "");
        assert!(p.is_resolved());
    }

    #[test]
    fn nan_coordinates_are_not_resolved() {
        let p = ResolvedPlace::resolved(dr_a(), Coord::new(f64::NAN, -72.0));
        assert!(p.coord().is_none());
    }

    #[test]
    fn query_defaults_and_validation() {
        let q = SearchQuery::default();
        assert_eq!(q.category, "pediatrician");
        assert_eq!(q.location, "Western Massachusetts, MA");

        assert!(SearchQuery::new("", "Amherst").is_err());
        assert!(SearchQuery::new("dentist", "  ").is_err());
        assert!(SearchQuery::new("dentist", "Amherst, MA").is_ok());
    }
}
