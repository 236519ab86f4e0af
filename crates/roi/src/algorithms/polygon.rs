use std::collections::HashSet;

use geo_types::{Coord, LineString, Polygon};
use crate::error::{Result, RoiError};

/// Close a traced contour into a polygon ring.
///
/// Contours with fewer than 3 distinct points cannot bound an area and are
/// rejected with [`RoiError::InvalidPolygon`].
pub fn build_polygon(points: &[[i32; 2]]) -> Result<Polygon<f64>> {
    let distinct = points.iter().collect::<HashSet<_>>().len();
    if distinct < 3 {
        return Err(RoiError::InvalidPolygon { distinct });
    }

    let mut coords: Vec<Coord<f64>> = points
        .iter()
        .map(|&[x, y]| Coord { x: f64::from(x), y: f64::from(y) })
        .collect();
    if coords.first() != coords.last() {
        coords.push(coords[0]);
    }

    Ok(Polygon::new(LineString::new(coords), vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_is_closed() {
        let polygon = build_polygon(&[[0, 0], [0, 3], [3, 3], [3, 0]]).expect("valid");
        let ring: Vec<_> = polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(ring, vec![(0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_already_closed_ring_is_not_doubled() {
        let polygon = build_polygon(&[[0, 0], [0, 2], [2, 2], [0, 0]]).expect("valid");
        assert_eq!(polygon.exterior().0.len(), 4);
    }

    #[test]
    fn test_degenerate_contours_are_rejected() {
        for points in [vec![], vec![[1, 1]], vec![[1, 1], [4, 1]], vec![[1, 1], [4, 1], [1, 1], [4, 1]]] {
            match build_polygon(&points) {
                Err(RoiError::InvalidPolygon { distinct }) => assert!(distinct < 3),
                other => panic!("expected InvalidPolygon, got {other:?}"),
            }
        }
    }
}
