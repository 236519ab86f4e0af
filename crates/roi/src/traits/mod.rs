use geo_types::{Coord, LineString, Polygon};
use image::GrayImage;
use crate::{algorithms::scaling::ScaleFactor, error::Result, types::Contour};

/// Trait for contour tracing algorithms
pub trait ContourTracer: Send + Sync {
    /// Trace the external boundaries of the foreground regions of a binary image
    fn trace(&self, binary_image: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for mapping mask-pixel coordinates into slide-pixel space
pub trait CoordinateScaler: Send + Sync {
    /// Map a single mask-space coordinate
    fn scale_coord(&self, coord: Coord<f64>, factor: ScaleFactor) -> Coord<f64>;

    /// Map every vertex of the polygon's exterior ring. Identity factors
    /// return the polygon untouched.
    fn scale_polygon(&self, polygon: &Polygon<f64>, factor: ScaleFactor) -> Polygon<f64> {
        if factor.is_identity() {
            return polygon.clone();
        }
        let ring: LineString<f64> = polygon
            .exterior()
            .coords()
            .map(|&coord| self.scale_coord(coord, factor))
            .collect();
        Polygon::new(ring, vec![])
    }
}
