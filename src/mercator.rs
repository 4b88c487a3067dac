//! Conversion between projected Spherical Mercator coordinates
//! (EPSG:3857, meters) and geographic WGS84 latitude/longitude
//! (EPSG:4326, degrees).
//!
//! Stored hexagon rings arrive in projected meters, while viewport
//! containment and grid indexing both work in degrees, so this is the
//! single conversion seam the rest of the crate goes through.

use crate::constants::{EARTH_RADIUS_M, MAX_LATITUDE_DEG};
use std::f64::consts::PI;

/// Converts a projected point in meters to `(lat, lng)` degrees.
pub fn unproject(x: f64, y: f64) -> (f64, f64) {
    let d = 180.0 / PI;
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI / 2.0) * d;
    let lng = x * d / EARTH_RADIUS_M;
    (lat, lng)
}

/// Converts `(lat, lng)` degrees to a projected point in meters.
///
/// Latitude is clamped to the Mercator cutoff so polar input stays finite.
pub fn project(lat: f64, lng: f64) -> (f64, f64) {
    let d = PI / 180.0;
    let lat = lat.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG);
    let sin_lat = (lat * d).sin();

    let x = EARTH_RADIUS_M * lng * d;
    let y = EARTH_RADIUS_M * ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / 2.0;
    (x, y)
}
