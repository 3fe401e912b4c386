//! Geographic primitives: WGS-84 points and closed bounding boxes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// An axis-aligned latitude/longitude rectangle.
///
/// Bounds are inclusive on all four sides. Regions that cross the
/// antimeridian are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct GeoRegion {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoRegion {
    /// Rough Western Massachusetts box, Berkshires through the Pioneer Valley.
    pub const WESTERN_MASSACHUSETTS: GeoRegion = GeoRegion {
        min_lat: 41.90,
        max_lat: 42.90,
        min_lng: -73.60,
        max_lng: -72.00,
    };

    /// Build a region, rejecting non-finite or inverted bounds.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Result<Self> {
        for (name, v) in [
            ("min_lat", min_lat),
            ("max_lat", max_lat),
            ("min_lng", min_lng),
            ("max_lng", max_lng),
        ] {
            if !v.is_finite() {
                return Err(Error::invalid(name, v, "must be a finite number"));
            }
        }
        if min_lat > max_lat {
            return Err(Error::invalid(
                "min_lat",
                min_lat,
                format!("greater than max_lat {}", max_lat),
            ));
        }
        if min_lng > max_lng {
            return Err(Error::invalid(
                "min_lng",
                min_lng,
                format!("greater than max_lng {}", max_lng),
            ));
        }
        Ok(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Look up a named preset (`"western-ma"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "western-ma" | "western-massachusetts" | "wma" => Some(Self::WESTERN_MASSACHUSETTS),
            _ => None,
        }
    }

    /// Closed-box containment. Non-finite coordinates are never contained.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.is_finite()
            && coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.lng >= self.min_lng
            && coord.lng <= self.max_lng
    }

    pub fn center(&self) -> Coord {
        Coord::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Unchecked bounds as they appear on the wire.
#[derive(Deserialize)]
struct RawRegion {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl TryFrom<RawRegion> for GeoRegion {
    type Error = Error;

    fn try_from(raw: RawRegion) -> Result<Self> {
        Self::new(raw.min_lat, raw.max_lat, raw.min_lng, raw.max_lng)
    }
}

impl FromStr for GeoRegion {
    type Err = Error;

    /// Parse either a preset name or `min_lat,max_lat,min_lng,max_lng`.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(region) = Self::preset(s.trim()) {
            return Ok(region);
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(Error::invalid(
                "bounds",
                s,
                "expected a preset name or min_lat,max_lat,min_lng,max_lng",
            ));
        }

        let mut values = [0.0_f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| Error::invalid("bounds", s, format!("'{}' is not a number", part)))?;
        }

        Self::new(values[0], values[1], values[2], values[3])
    }
}
