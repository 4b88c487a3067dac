//! Resolution-aware aggregation of visible hexagons into grid cells.
//!
//! Each surviving ring contributes one representative point (its first
//! coordinate). The point is unprojected and indexed into the cell grid at
//! the resolution the current zoom calls for; duplicate cell identifiers
//! within one pass collapse to a single renderable cell. Coarse resolutions
//! therefore merge dense clusters into few large cells, fine resolutions
//! keep them apart.

use std::collections::HashSet;

use h3o::{CellIndex, LatLng};
use serde::Serialize;

use crate::constants::{CELL_FILL_OPACITY, CELL_STROKE_WEIGHT};
use crate::error::Result;
use crate::hexagon::{HexGeometry, HexagonFeature};
use crate::mercator;
use crate::resolution::resolution_for_zoom;

/// Path style for a drawn cell, serialized with the property names map
/// renderers expect.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellStyle {
    #[serde(rename = "color")]
    pub stroke_color: String,
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
}

impl CellStyle {
    /// Stroke and fill both take the hexagon's `COLOR_HEX`, prefixed for CSS.
    fn from_color_hex(color_hex: &str) -> Self {
        let color = format!("#{color_hex}");
        Self {
            stroke_color: color.clone(),
            fill_color: color,
            fill_opacity: CELL_FILL_OPACITY,
            stroke_weight: CELL_STROKE_WEIGHT,
        }
    }
}

/// One grid cell ready for a render sink.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderableCell {
    /// Canonical cell identifier at the pass's resolution.
    pub cell: CellIndex,
    /// Geographic outline as `[lat, lng]` vertices, first vertex repeated
    /// at the end so the ring is explicitly closed.
    pub boundary: Vec<[f64; 2]>,
    /// Style inherited from the first hexagon that produced this cell.
    pub style: CellStyle,
}

/// Collapses visible hexagons into deduplicated renderable grid cells.
///
/// Emission order follows traversal order (hexagon, then polygon, then
/// ring), so equal input yields equal output. Deduplication is scoped to
/// this call; nothing persists between passes. Hexagons without MultiPolygon
/// geometry contribute nothing. A representative point the grid index
/// rejects aborts the whole pass: no partial batch escapes.
pub fn aggregate(visible: &[HexagonFeature], zoom: f64) -> Result<Vec<RenderableCell>> {
    let resolution = resolution_for_zoom(zoom);
    let mut seen: HashSet<CellIndex> = HashSet::new();
    let mut cells: Vec<RenderableCell> = Vec::new();

    for hexagon in visible {
        let HexGeometry::MultiPolygon { coordinates } = &hexagon.geometry else {
            continue;
        };

        for polygon in coordinates {
            for ring in polygon {
                let Some(&[x, y]) = ring.first() else {
                    continue;
                };

                let (lat, lng) = mercator::unproject(x, y);
                let cell = LatLng::new(lat, lng)?.to_cell(resolution);

                if seen.insert(cell) {
                    cells.push(RenderableCell {
                        cell,
                        boundary: cell_boundary(cell),
                        style: CellStyle::from_color_hex(&hexagon.properties.color_hex),
                    });
                }
            }
        }
    }

    Ok(cells)
}

/// The cell's outline as a closed `[lat, lng]` ring.
fn cell_boundary(cell: CellIndex) -> Vec<[f64; 2]> {
    let mut coords: Vec<[f64; 2]> = cell
        .boundary()
        .iter()
        .map(|vertex| [vertex.lat(), vertex.lng()])
        .collect();

    if let Some(first) = coords.first().copied() {
        coords.push(first);
    }
    coords
}
