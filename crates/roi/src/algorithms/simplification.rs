use geo::Simplify;
use geo_types::Polygon;
use tracing::debug;

/// Douglas-Peucker simplification of a slide-space polygon.
///
/// A ring that would collapse below 3 distinct vertices is returned
/// unsimplified.
pub fn simplify_polygon(polygon: &Polygon<f64>, tolerance: f64) -> Polygon<f64> {
    if tolerance <= 0.0 {
        return polygon.clone();
    }
    let simplified = polygon.simplify(&tolerance);
    if simplified.exterior().0.len() < 4 {
        debug!(tolerance, "simplification collapsed the ring, keeping original");
        return polygon.clone();
    }
    simplified
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::LineString;

    #[test]
    fn test_collinear_vertices_are_removed() {
        let polygon = Polygon::new(
            LineString::from(vec![
                (0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.2), (10.0, 0.0), (0.0, 0.0),
            ]),
            vec![],
        );
        let simplified = simplify_polygon(&polygon, 0.5);
        assert_eq!(simplified.exterior().0.len(), 5);
    }

    #[test]
    fn test_collapsing_ring_is_kept() {
        let sliver = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (0.0, 10.0), (0.1, 5.0), (0.0, 0.0)]),
            vec![],
        );
        assert!(simplify_polygon(&sliver, 1.0).exterior().0.len() >= 4);
    }

    #[test]
    fn test_zero_tolerance_is_a_no_op() {
        let triangle = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (0.0, 10.0), (4.0, 5.0), (0.0, 0.0)]),
            vec![],
        );
        assert_eq!(simplify_polygon(&triangle, 0.0), triangle);
    }
}
