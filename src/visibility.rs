//! Visibility filter: clips the stored dataset to the current viewport.
//!
//! Filtering is per vertex, not per shape. A ring keeps exactly the
//! coordinates whose unprojected position falls inside the bounds; rings,
//! polygons and hexagons left empty by that are dropped. Downstream reads a
//! single representative point per surviving ring, so partially clipped
//! (open) rings are acceptable output.

use crate::hexagon::{HexGeometry, HexagonFeature, MultiPolygonCoords, ProjectedCoord};
use crate::mercator;
use crate::viewport::LatLngBounds;

/// Returns fresh copies of the hexagons with only in-view coordinates kept.
///
/// With no bounds established yet there is nothing visible and the result is
/// empty. Input order is preserved; the input itself is never mutated.
/// Non-finite coordinates unproject to non-finite positions and fail the
/// containment test, so they are clipped instead of panicking.
pub fn filter_visible(
    hexagons: &[HexagonFeature],
    bounds: Option<&LatLngBounds>,
) -> Vec<HexagonFeature> {
    let Some(bounds) = bounds else {
        return Vec::new();
    };

    hexagons
        .iter()
        .filter_map(|hexagon| clip_hexagon(hexagon, bounds))
        .collect()
}

/// Clips one hexagon, returning `None` once nothing of it remains in view.
fn clip_hexagon(hexagon: &HexagonFeature, bounds: &LatLngBounds) -> Option<HexagonFeature> {
    let HexGeometry::MultiPolygon { coordinates } = &hexagon.geometry else {
        return None;
    };

    let polygons: MultiPolygonCoords = coordinates
        .iter()
        .filter_map(|polygon| {
            let rings: Vec<Vec<ProjectedCoord>> = polygon
                .iter()
                .filter_map(|ring| clip_ring(ring, bounds))
                .collect();
            (!rings.is_empty()).then_some(rings)
        })
        .collect();

    if polygons.is_empty() {
        return None;
    }

    Some(HexagonFeature {
        geometry: HexGeometry::MultiPolygon {
            coordinates: polygons,
        },
        properties: hexagon.properties.clone(),
    })
}

fn clip_ring(ring: &[ProjectedCoord], bounds: &LatLngBounds) -> Option<Vec<ProjectedCoord>> {
    let kept: Vec<ProjectedCoord> = ring
        .iter()
        .copied()
        .filter(|&[x, y]| {
            let (lat, lng) = mercator::unproject(x, y);
            bounds.contains(lat, lng)
        })
        .collect();

    (!kept.is_empty()).then_some(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Projects geographic (lat, lng) points into the stored coordinate space.
    fn projected_ring(points: &[(f64, f64)]) -> Vec<ProjectedCoord> {
        points
            .iter()
            .map(|&(lat, lng)| {
                let (x, y) = mercator::project(lat, lng);
                [x, y]
            })
            .collect()
    }

    fn single_ring_feature(id: i64, points: &[(f64, f64)]) -> HexagonFeature {
        HexagonFeature::multi_polygon(id, "00FF00", vec![vec![projected_ring(points)]])
    }

    fn ids(features: &[HexagonFeature]) -> Vec<i64> {
        features.iter().map(|f| f.properties.id).collect()
    }

    #[test]
    fn test_no_bounds_yields_empty_result() {
        let hexagons = vec![single_ring_feature(1, &[(2.0, 2.0), (3.0, 3.0)])];
        assert!(filter_visible(&hexagons, None).is_empty());
    }

    #[test]
    fn test_fully_partially_and_non_visible_hexagons() {
        let bounds = LatLngBounds::new((0.0, 0.0), (10.0, 10.0));
        let inside = single_ring_feature(1, &[(2.0, 2.0), (2.0, 4.0), (4.0, 3.0)]);
        let straddling = single_ring_feature(2, &[(5.0, 5.0), (5.0, 15.0), (8.0, 8.0)]);
        let outside = single_ring_feature(3, &[(20.0, 20.0), (22.0, 22.0), (24.0, 20.0)]);
        let hexagons = vec![inside.clone(), straddling, outside];

        let visible = filter_visible(&hexagons, Some(&bounds));

        assert_eq!(ids(&visible), vec![1, 2]);
        assert_eq!(visible[0], inside);

        match &visible[1].geometry {
            HexGeometry::MultiPolygon { coordinates } => {
                assert_eq!(coordinates[0][0].len(), 2);
            }
            HexGeometry::Unsupported => panic!("clipped hexagon lost its geometry"),
        }
    }

    #[test]
    fn test_boundary_vertices_are_inclusive() {
        // The bounds corner is derived from the unprojected vertex itself so
        // the containment test sees a position exactly on the edge.
        let (x, y) = mercator::project(10.0, 10.0);
        let (north, east) = mercator::unproject(x, y);
        let bounds = LatLngBounds::new((0.0, 0.0), (north, east));
        let on_corner = HexagonFeature::multi_polygon(7, "00FF00", vec![vec![vec![[x, y]]]]);

        let visible = filter_visible(&[on_corner], Some(&bounds));

        assert_eq!(ids(&visible), vec![7]);
    }

    #[test]
    fn test_surviving_points_all_lie_within_bounds() {
        let bounds = LatLngBounds::new((0.0, 0.0), (10.0, 10.0));
        let hexagons = vec![
            single_ring_feature(1, &[(2.0, 2.0), (12.0, 5.0), (5.0, 12.0), (7.0, 7.0)]),
            single_ring_feature(2, &[(9.0, 9.0), (-4.0, 3.0)]),
        ];

        let visible = filter_visible(&hexagons, Some(&bounds));

        assert_eq!(visible.len(), 2);
        for feature in &visible {
            let HexGeometry::MultiPolygon { coordinates } = &feature.geometry else {
                panic!("filter output keeps MultiPolygon geometry");
            };
            for polygon in coordinates {
                for ring in polygon {
                    for &[x, y] in ring {
                        let (lat, lng) = mercator::unproject(x, y);
                        assert!(bounds.contains(lat, lng), "({lat}, {lng}) escaped the filter");
                    }
                }
            }
        }
    }

    #[test]
    fn test_single_surviving_vertex_keeps_its_ring() {
        let bounds = LatLngBounds::new((0.0, 0.0), (10.0, 10.0));
        let mostly_outside = single_ring_feature(6, &[(5.0, 5.0), (50.0, 50.0), (60.0, 60.0)]);

        let visible = filter_visible(&[mostly_outside], Some(&bounds));

        assert_eq!(visible.len(), 1);
        match &visible[0].geometry {
            HexGeometry::MultiPolygon { coordinates } => {
                assert_eq!(coordinates[0][0].len(), 1);
            }
            HexGeometry::Unsupported => panic!("the ring should survive with one vertex"),
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let bounds = LatLngBounds::new((0.0, 0.0), (10.0, 10.0));
        let hexagons = vec![
            single_ring_feature(1, &[(2.0, 2.0), (2.0, 12.0), (4.0, 4.0)]),
            single_ring_feature(2, &[(50.0, 50.0)]),
        ];

        let once = filter_visible(&hexagons, Some(&bounds));
        let twice = filter_visible(&once, Some(&bounds));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unsupported_geometry_is_dropped() {
        let bounds = LatLngBounds::new((-90.0, -180.0), (90.0, 180.0));
        let point = HexagonFeature {
            geometry: HexGeometry::Unsupported,
            properties: crate::hexagon::HexagonProperties {
                color_hex: "112233".to_string(),
                id: 9,
            },
        };

        assert!(filter_visible(&[point], Some(&bounds)).is_empty());
    }

    #[test]
    fn test_non_finite_coordinates_are_clipped_not_fatal() {
        let bounds = LatLngBounds::new((-90.0, -180.0), (90.0, 180.0));
        let mut ring = projected_ring(&[(1.0, 1.0), (2.0, 2.0)]);
        ring.push([f64::NAN, 0.0]);
        let feature = HexagonFeature::multi_polygon(4, "ABCDEF", vec![vec![ring]]);

        let visible = filter_visible(&[feature], Some(&bounds));

        match &visible[0].geometry {
            HexGeometry::MultiPolygon { coordinates } => {
                assert_eq!(coordinates[0][0].len(), 2);
            }
            HexGeometry::Unsupported => panic!("finite vertices should survive"),
        }
    }

    #[test]
    fn test_multi_polygon_drops_only_empty_parts() {
        let bounds = LatLngBounds::new((0.0, 0.0), (10.0, 10.0));
        let in_view = projected_ring(&[(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)]);
        let out_of_view = projected_ring(&[(40.0, 40.0), (41.0, 41.0)]);
        let feature = HexagonFeature::multi_polygon(
            11,
            "0000FF",
            vec![vec![in_view.clone()], vec![out_of_view]],
        );

        let visible = filter_visible(&[feature], Some(&bounds));

        match &visible[0].geometry {
            HexGeometry::MultiPolygon { coordinates } => {
                assert_eq!(coordinates.len(), 1);
                assert_eq!(coordinates[0][0], in_view);
            }
            HexGeometry::Unsupported => panic!("surviving polygon should remain"),
        }
    }
}
