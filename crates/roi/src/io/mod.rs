pub mod geojson;

use std::{fs, io::Write, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::{error::Result, types::ShapeCollection};

/// Serialization of the converted shapes
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    /// `{"shapes": [{"coordinates", "length", "area"}]}`
    #[default]
    Shapes,
    /// GeoJSON FeatureCollection with `area` and `length` properties
    Geojson,
}

impl ShapeCollection {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Shapes => self.to_json_string(),
            OutputFormat::Geojson => self.to_geojson_string(),
        }
    }

    /// Write the rendered document followed by a newline
    pub fn write_to<W: Write>(&self, mut writer: W, format: OutputFormat) -> Result<()> {
        writeln!(writer, "{}", self.render(format)?)?;
        Ok(())
    }

    /// Save to file
    pub fn save(&self, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
        fs::write(path, self.render(format)?)?;
        Ok(())
    }

    /// Load a shapes document
    pub fn from_json_str(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeRecord;

    fn sample() -> ShapeCollection {
        ShapeCollection {
            shapes: vec![ShapeRecord {
                coordinates: vec![[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [1.0, 1.0]],
                length: 2.5,
                area: 2.0,
            }],
        }
    }

    #[test]
    fn test_shapes_document_layout() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json_string().expect("json")).expect("parse");
        assert_eq!(value["shapes"][0]["coordinates"][1], serde_json::json!([1.0, 3.0]));
        assert_eq!(value["shapes"][0]["length"], serde_json::json!(2.5));
        assert_eq!(value["shapes"][0]["area"], serde_json::json!(2.0));
    }

    #[test]
    fn test_empty_collection_document() {
        assert_eq!(ShapeCollection::default().to_json_string().expect("json"), r#"{"shapes":[]}"#);
    }

    #[test]
    fn test_write_to_and_read_back() {
        let mut buffer = Vec::new();
        sample().write_to(&mut buffer, OutputFormat::Shapes).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.ends_with('\n'));
        assert_eq!(ShapeCollection::from_json_str(text.trim_end()).expect("read"), sample());
    }

    #[test]
    fn test_format_names() {
        assert_eq!("geojson".parse::<OutputFormat>(), Ok(OutputFormat::Geojson));
        assert_eq!(OutputFormat::Shapes.to_string(), "shapes");
    }
}
