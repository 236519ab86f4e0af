use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::algorithms::{DEFAULT_MIN_AREA_PERCENT, FilterStage, LengthMetric, ScalingMode};

/// Serializable pipeline settings, e.g. loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// How mask coordinates are mapped into slide space
    pub scaling: ScalingMode,
    /// Which characteristic length is reported per shape
    pub length_metric: LengthMetric,
    /// Whether the noise filter looks at mask-space or slide-space area
    pub filter_stage: FilterStage,
    /// Minimum share of the reference area a shape must cover, in percent
    #[schemars(range(min = 0.0, max = 100.0))]
    pub min_area_percent: f64,
    /// Douglas-Peucker tolerance in slide pixels, applied after scaling
    pub simplify_tolerance: Option<f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scaling: ScalingMode::default(),
            length_metric: LengthMetric::default(),
            filter_stage: FilterStage::default(),
            min_area_percent: DEFAULT_MIN_AREA_PERCENT,
            simplify_tolerance: None,
        }
    }
}

impl PipelineConfig {
    /// JSON schema describing the configuration file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PipelineConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"scaling": "naive", "simplify_tolerance": 1.5}"#).expect("config");
        assert_eq!(config.scaling, ScalingMode::Naive);
        assert_eq!(config.length_metric, LengthMetric::EnclosingCircle);
        assert_eq!(config.min_area_percent, DEFAULT_MIN_AREA_PERCENT);
        assert_eq!(config.simplify_tolerance, Some(1.5));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<PipelineConfig>(r#"{"scale": "naive"}"#).is_err());
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = serde_json::to_value(PipelineConfig::schema()).expect("schema");
        let properties = schema["properties"].as_object().expect("properties");
        assert!(properties.contains_key("scaling"));
        assert!(properties.contains_key("filter_stage"));
    }
}
