use geo_types::Coord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};
use tracing::info;

use crate::{traits::CoordinateScaler, types::ResolutionPair};

/// Linear magnification from mask-pixel space to slide-pixel space.
///
/// A single scalar stands in for both axes, which is exact only when mask
/// and slide share their aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub const IDENTITY: ScaleFactor = ScaleFactor(1.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// `sqrt(slide_area / mask_area)`. An empty mask maps to the identity.
    pub fn from_resolutions(slide: ResolutionPair, mask_width: u32, mask_height: u32) -> Self {
        let mask_area = f64::from(mask_width) * f64::from(mask_height);
        if mask_area == 0.0 {
            return Self::IDENTITY;
        }
        let factor = Self((slide.area() / mask_area).sqrt());
        info!("Scale factor is {}", factor.0);
        factor
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_identity(self) -> bool {
        self.0 == 1.0
    }
}

/// Multiplies coordinates by the factor, no offset correction
#[derive(Debug, Clone, Default)]
pub struct NaiveScaler;

impl CoordinateScaler for NaiveScaler {
    fn scale_coord(&self, coord: Coord<f64>, factor: ScaleFactor) -> Coord<f64> {
        Coord {
            x: coord.x * factor.value(),
            y: coord.y * factor.value(),
        }
    }
}

/// Treats integer coordinates as pixel corners and shifts by half a pixel
/// before magnifying: `(raw + 0.5) * scale`.
#[derive(Debug, Clone, Default)]
pub struct PixelCenterScaler;

impl CoordinateScaler for PixelCenterScaler {
    fn scale_coord(&self, coord: Coord<f64>, factor: ScaleFactor) -> Coord<f64> {
        Coord {
            x: (coord.x + 0.5) * factor.value(),
            y: (coord.y + 0.5) * factor.value(),
        }
    }
}

/// Scaling strategy, resolved once when the pipeline is configured
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScalingMode {
    #[default]
    PixelCenter,
    Naive,
}

impl ScalingMode {
    pub fn scaler(self) -> Box<dyn CoordinateScaler> {
        match self {
            ScalingMode::PixelCenter => Box::new(PixelCenterScaler),
            ScalingMode::Naive => Box::new(NaiveScaler),
        }
    }
}
