use geo::{Area, MinimumRotatedRect};
use geo_types::{Coord, Polygon};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::types::ShapeRecord;

/// Relative slack when testing whether a point lies inside a circle.
const CIRCLE_EPSILON: f64 = 1e-9;

/// Characteristic "diameter" reported as a shape's length
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LengthMetric {
    /// Diameter of the minimum enclosing circle of the ring's vertices
    #[default]
    EnclosingCircle,
    /// Longer side of the minimum-area rotated bounding rectangle
    RotatedRectangle,
}

impl LengthMetric {
    pub fn measure(self, polygon: &Polygon<f64>) -> f64 {
        match self {
            LengthMetric::EnclosingCircle => {
                let vertices: Vec<Coord<f64>> = polygon.exterior().coords().copied().collect();
                minimum_enclosing_circle(&vertices).map_or(0.0, |circle| circle.radius * 2.0)
            }
            LengthMetric::RotatedRectangle => polygon
                .minimum_rotated_rect()
                .map(|rect| {
                    rect.exterior()
                        .lines()
                        .map(|line| line.dx().hypot(line.dy()))
                        .fold(0.0, f64::max)
                })
                .unwrap_or(0.0),
        }
    }
}

impl ShapeRecord {
    /// Exterior ring, shoelace area and characteristic length of a polygon.
    pub fn from_polygon(polygon: &Polygon<f64>, metric: LengthMetric) -> Self {
        Self {
            coordinates: polygon.exterior().coords().map(|c| [c.x, c.y]).collect(),
            length: metric.measure(polygon),
            area: polygon.unsigned_area(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Coord<f64>,
    pub radius: f64,
}

impl Circle {
    fn contains(&self, point: Coord<f64>) -> bool {
        distance(self.center, point) <= self.radius + CIRCLE_EPSILON * self.radius.max(1.0)
    }

    fn from_diameter(a: Coord<f64>, b: Coord<f64>) -> Self {
        let center = Coord { x: (a.x + b.x) / 2.0, y: (a.y + b.y) / 2.0 };
        Self { center, radius: distance(a, b) / 2.0 }
    }

    /// Circle through three points; collinear triples fall back to the
    /// circle over their farthest pair.
    fn through(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Self {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < f64::EPSILON {
            return [Self::from_diameter(a, b), Self::from_diameter(a, c), Self::from_diameter(b, c)]
                .into_iter()
                .fold(Self::from_diameter(a, a), |best, circle| {
                    if circle.radius > best.radius { circle } else { best }
                });
        }
        let (a2, b2, c2) = (a.x * a.x + a.y * a.y, b.x * b.x + b.y * b.y, c.x * c.x + c.y * c.y);
        let center = Coord {
            x: (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            y: (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        };
        Self { center, radius: distance(center, a) }
    }
}

fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Smallest circle containing every point (incremental Welzl construction).
pub fn minimum_enclosing_circle(points: &[Coord<f64>]) -> Option<Circle> {
    let (&first, rest) = points.split_first()?;
    let mut circle = Circle { center: first, radius: 0.0 };
    for (i, &p) in rest.iter().enumerate() {
        if circle.contains(p) {
            continue;
        }
        circle = Circle { center: p, radius: 0.0 };
        for (j, &q) in points[..=i].iter().enumerate() {
            if circle.contains(q) {
                continue;
            }
            circle = Circle::from_diameter(p, q);
            for &r in &points[..j] {
                if !circle.contains(r) {
                    circle = Circle::through(p, q, r);
                }
            }
        }
    }
    Some(circle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::LineString;

    fn square(side: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (0.0, side), (side, side), (side, 0.0), (0.0, 0.0)]),
            vec![],
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_square_record() {
        let record = ShapeRecord::from_polygon(&square(4.0), LengthMetric::EnclosingCircle);
        assert_eq!(record.coordinates.first(), record.coordinates.last());
        assert_eq!(record.coordinates.len(), 5);
        assert!(close(record.area, 16.0));
        assert!(close(record.length, 4.0 * 2f64.sqrt()));
    }

    #[test]
    fn test_rotated_rectangle_length() {
        let rectangle = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (0.0, 2.0), (6.0, 2.0), (6.0, 0.0), (0.0, 0.0)]),
            vec![],
        );
        assert!(close(LengthMetric::RotatedRectangle.measure(&rectangle), 6.0));
        assert!(close(LengthMetric::EnclosingCircle.measure(&rectangle), 40f64.sqrt()));
    }

    #[test]
    fn test_enclosing_circle_of_triangle() {
        // Obtuse triangle: the circle is spanned by the longest side
        let points = [Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 0.0 }, Coord { x: 5.0, y: 1.0 }];
        let circle = minimum_enclosing_circle(&points).expect("circle");
        assert!(close(circle.radius, 5.0));
        assert!(close(circle.center.x, 5.0) && close(circle.center.y, 0.0));

        // Equilateral triangle: circumcircle
        let h = 3f64.sqrt() / 2.0;
        let points = [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }, Coord { x: 0.5, y: h }];
        let circle = minimum_enclosing_circle(&points).expect("circle");
        assert!(close(circle.radius, 1.0 / 3f64.sqrt()));
    }

    #[test]
    fn test_enclosing_circle_contains_all_points() {
        let points: Vec<Coord<f64>> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.7;
                Coord { x: 10.0 * t.cos() + (i % 3) as f64, y: 6.0 * t.sin() - (i % 5) as f64 }
            })
            .collect();
        let circle = minimum_enclosing_circle(&points).expect("circle");
        assert!(points.iter().all(|&p| distance(circle.center, p) <= circle.radius + 1e-6));
    }

    #[test]
    fn test_empty_and_single_point() {
        assert!(minimum_enclosing_circle(&[]).is_none());
        let single = minimum_enclosing_circle(&[Coord { x: 3.0, y: 4.0 }]).expect("circle");
        assert_eq!(single.radius, 0.0);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(LengthMetric::default(), LengthMetric::EnclosingCircle);
        assert_eq!("rotated-rectangle".parse::<LengthMetric>(), Ok(LengthMetric::RotatedRectangle));
    }
}
