use geojson::{Feature, FeatureCollection, Geometry, Value};
use crate::{error::Result, types::ShapeCollection};

impl ShapeCollection {
    /// Render the shapes as a GeoJSON FeatureCollection in slide-pixel coordinates
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| {
                let ring = shape.coordinates.iter().map(|&[x, y]| vec![x, y]).collect();
                let geometry = Geometry::new(Value::Polygon(vec![ring]));

                let mut properties = serde_json::Map::new();
                properties.insert("id".to_string(), serde_json::Value::from(i));
                properties.insert("area".to_string(), serde_json::Value::from(shape.area));
                properties.insert("length".to_string(), serde_json::Value::from(shape.length));

                let (min, max) = shape.bounds();
                Feature {
                    bbox: Some(vec![min[0], min[1], max[0], max[1]]),
                    geometry: Some(geometry),
                    id: Some(geojson::feature::Id::Number(serde_json::Number::from(i))),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("shape_count".to_string(), serde_json::Value::from(self.shapes.len()));

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        }
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_geojson())?)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{ShapeCollection, ShapeRecord};

    #[test]
    fn test_features_carry_metrics() {
        let shapes = ShapeCollection {
            shapes: vec![ShapeRecord {
                coordinates: vec![[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]],
                length: 2.0 * 2f64.sqrt(),
                area: 4.0,
            }],
        };
        let collection = shapes.to_geojson();
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.bbox, Some(vec![0.0, 0.0, 2.0, 2.0]));
        assert_eq!(feature.property("area").and_then(|v| v.as_f64()), Some(4.0));
        assert!(matches!(
            feature.geometry.as_ref().map(|g| &g.value),
            Some(geojson::Value::Polygon(rings)) if rings[0].len() == 5
        ));
    }
}
