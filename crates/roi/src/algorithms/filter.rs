use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

/// Default minimum share of the reference area, in percent.
pub const DEFAULT_MIN_AREA_PERCENT: f64 = 0.02;

/// Minimum relative area filter for thresholding noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaFilter {
    pub min_area_percent: f64,
}

impl Default for AreaFilter {
    fn default() -> Self {
        Self { min_area_percent: DEFAULT_MIN_AREA_PERCENT }
    }
}

impl AreaFilter {
    pub fn new(min_area_percent: f64) -> Self {
        Self { min_area_percent }
    }

    /// Whether `area` covers at least `min_area_percent` of `reference_area`.
    pub fn accepts(&self, area: f64, reference_area: f64) -> bool {
        if reference_area <= 0.0 {
            return false;
        }
        area * 100.0 / reference_area >= self.min_area_percent
    }

    /// Keep the items whose area passes the filter.
    pub fn retain<T>(&self, items: Vec<T>, reference_area: f64, area: impl Fn(&T) -> f64) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| self.accepts(area(item), reference_area))
            .collect()
    }
}

/// Which area the filter decision is taken on
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FilterStage {
    /// Mask-space area against the mask grid area
    #[default]
    BeforeScaling,
    /// Slide-space area against the slide area
    AfterScaling,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_boundary() {
        let filter = AreaFilter::default();
        // 0.02% of 10_000 is exactly 2 square pixels
        assert!(filter.accepts(2.0, 10_000.0));
        assert!(!filter.accepts(1.99, 10_000.0));
    }

    #[test]
    fn test_empty_reference_rejects_everything() {
        assert!(!AreaFilter::default().accepts(10.0, 0.0));
    }

    #[test]
    fn test_retain_keeps_order() {
        let filter = AreaFilter::new(1.0);
        let kept = filter.retain(vec![5.0, 0.5, 3.0, 1.0], 100.0, |a| *a);
        assert_eq!(kept, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_filter_stage_names() {
        assert_eq!(FilterStage::default(), FilterStage::BeforeScaling);
        assert_eq!("after-scaling".parse::<FilterStage>(), Ok(FilterStage::AfterScaling));
        assert_eq!(FilterStage::BeforeScaling.to_string(), "before-scaling");
    }
}
