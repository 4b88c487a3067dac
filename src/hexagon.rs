//! Data model for stored hexagon features.
//!
//! Features mirror the GeoJSON document the dataset ships as: MultiPolygon
//! geometry whose rings are in projected Spherical Mercator meters, plus
//! display properties carried through untouched.

use serde::{Deserialize, Serialize};

/// A projected x/y pair as stored in dataset rings.
pub type ProjectedCoord = [f64; 2];

/// Polygons, each a list of rings, each a list of projected coordinates.
pub type MultiPolygonCoords = Vec<Vec<Vec<ProjectedCoord>>>;

/// Geometry of one stored hexagon.
///
/// Collections are allowed to be heterogeneous: any geometry that is not a
/// MultiPolygon deserializes to `Unsupported` and is skipped downstream
/// rather than failing the whole document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum HexGeometry {
    MultiPolygon { coordinates: MultiPolygonCoords },
    #[serde(other)]
    Unsupported,
}

/// Display attributes attached to a hexagon; opaque to the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HexagonProperties {
    /// Six hex digits without the leading `#`
    #[serde(rename = "COLOR_HEX")]
    pub color_hex: String,
    #[serde(rename = "ID")]
    pub id: i64,
}

/// One record of the hexagon dataset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HexagonFeature {
    pub geometry: HexGeometry,
    pub properties: HexagonProperties,
}

impl HexagonFeature {
    /// Builds a MultiPolygon feature from projected rings.
    pub fn multi_polygon(id: i64, color_hex: &str, coordinates: MultiPolygonCoords) -> Self {
        Self {
            geometry: HexGeometry::MultiPolygon { coordinates },
            properties: HexagonProperties {
                color_hex: color_hex.to_string(),
                id,
            },
        }
    }

    /// Number of rings across all polygons; zero for unsupported geometry.
    pub fn ring_count(&self) -> usize {
        match &self.geometry {
            HexGeometry::MultiPolygon { coordinates } => {
                coordinates.iter().map(|polygon| polygon.len()).sum()
            }
            HexGeometry::Unsupported => 0,
        }
    }
}
