//! GeoJSON projection of a render batch.
//!
//! Turns the cells of one pass into a FeatureCollection a browser map can
//! draw directly: one Polygon per cell, cell identifier and style carried
//! as properties.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

use crate::aggregate::RenderableCell;

/// Builds a FeatureCollection from the cells of one render pass.
pub fn cells_to_geojson(cells: &[RenderableCell]) -> GeoJson {
    let features = cells.iter().map(cell_feature).collect();

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn cell_feature(cell: &RenderableCell) -> Feature {
    // Boundaries are stored lat/lng; GeoJSON positions are lng/lat
    let ring: Vec<Vec<f64>> = cell
        .boundary
        .iter()
        .map(|&[lat, lng]| vec![lng, lat])
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("cell".to_string(), JsonValue::from(cell.cell.to_string()));
    properties.insert(
        "style".to_string(),
        serde_json::to_value(&cell.style).unwrap_or(JsonValue::Null),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::hexagon::HexagonFeature;
    use crate::mercator;

    fn sample_cells() -> Vec<RenderableCell> {
        let (x, y) = mercator::project(40.0, -3.7);
        let madrid = HexagonFeature::multi_polygon(1, "3F8E55", vec![vec![vec![[x, y]]]]);
        let (x, y) = mercator::project(-33.8, 151.2);
        let sydney = HexagonFeature::multi_polygon(2, "FF0000", vec![vec![vec![[x, y]]]]);
        aggregate(&[madrid, sydney], 6.0).unwrap()
    }

    #[test]
    fn test_export_builds_one_polygon_per_cell() {
        let cells = sample_cells();

        let GeoJson::FeatureCollection(collection) = cells_to_geojson(&cells) else {
            panic!("expected a FeatureCollection");
        };

        assert_eq!(collection.features.len(), cells.len());

        let feature = &collection.features[0];
        let geometry = feature.geometry.as_ref().unwrap();
        match &geometry.value {
            Value::Polygon(rings) => {
                let ring = &rings[0];
                assert_eq!(ring.len(), cells[0].boundary.len());
                // Stored lat/lng flips to GeoJSON lng/lat
                assert_eq!(ring[0][0], cells[0].boundary[0][1]);
                assert_eq!(ring[0][1], cells[0].boundary[0][0]);
                assert_eq!(ring.first(), ring.last());
            }
            other => panic!("expected a Polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_export_carries_identifier_and_style() {
        let cells = sample_cells();

        let GeoJson::FeatureCollection(collection) = cells_to_geojson(&cells) else {
            panic!("expected a FeatureCollection");
        };

        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(
            properties.get("cell").unwrap().as_str().unwrap(),
            cells[0].cell.to_string()
        );

        let style = properties.get("style").unwrap();
        assert_eq!(style["fillColor"], "#3F8E55");
        assert_eq!(style["color"], "#3F8E55");
        assert_eq!(style["fillOpacity"], 0.5);
        assert_eq!(style["weight"], 1.0);
    }

    #[test]
    fn test_export_of_empty_batch_is_an_empty_collection() {
        let GeoJson::FeatureCollection(collection) = cells_to_geojson(&[]) else {
            panic!("expected a FeatureCollection");
        };
        assert!(collection.features.is_empty());
    }
}
