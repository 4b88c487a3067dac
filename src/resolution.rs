//! Zoom to grid-resolution policy.

use h3o::Resolution;

/// Maps a map zoom level to the grid resolution cells are aggregated at.
///
/// Hand-tuned half-open bands: zooming out coarsens the grid so stacked
/// hexagons collapse into fewer cells, zooming in refines it. Pure and
/// monotonic; replacement thresholds must keep both properties.
pub fn resolution_for_zoom(zoom: f64) -> Resolution {
    if zoom < 3.0 {
        Resolution::Two
    } else if zoom < 5.0 {
        Resolution::Three
    } else if zoom < 7.0 {
        Resolution::Four
    } else if zoom < 9.0 {
        Resolution::Five
    } else if zoom < 11.0 {
        Resolution::Six
    } else {
        Resolution::Seven
    }
}
