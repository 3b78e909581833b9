//! Geographic points and spatial reference handling.
//!
//! Points are stored with `x = longitude` and `y = latitude`, the axis order
//! PostGIS expects for SRID 4326.

use geo::{Distance, Euclidean};
use serde::{Deserialize, Serialize};

/// WGS84 spatial reference identifier.
pub const DEFAULT_SRID: i32 = 4326;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude (y).
    pub lat: f64,
    /// Longitude (x).
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar distance to `other`, in coordinate units.
    ///
    /// This matches `ST_DWithin` on a `geometry` column: in SRID 4326 the
    /// result is in degrees, not meters.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        Euclidean.distance(geo::Point::from(*self), geo::Point::from(*other))
    }

    /// Whether `other` lies within `radius` of this point (inclusive).
    pub fn within(&self, other: &GeoPoint, radius: f64) -> bool {
        self.distance(other) <= radius
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Point::new(p.lng, p.lat)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(p: geo::Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}
