pub mod builder;
pub mod config;

use geo::Area;
use geo_types::Polygon;
use strum::Display;
use tracing::{debug, info, info_span};

use crate::{
    error::Result,
    algorithms::{
        AreaFilter, FilterStage, LengthMetric, ScaleFactor, Threshold,
        apply_threshold, build_polygon, simplify_polygon,
    },
    traits::{ContourTracer, CoordinateScaler},
    types::{Mask, ResolutionPair, ShapeCollection, ShapeRecord},
};

/// Stages a conversion walks through, strictly in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PipelineStage {
    Init,
    Thresholded,
    Traced,
    Built,
    Scaled,
    Filtered,
    Emitted,
}

/// A polygon in slide space together with the mask-space area it came from
struct ScaledShape {
    mask_area: f64,
    polygon: Polygon<f64>,
}

/// Mask to slide-space shapes conversion
pub struct Pipeline {
    tracer: Box<dyn ContourTracer>,
    scaler: Box<dyn CoordinateScaler>,
    area_filter: AreaFilter,
    filter_stage: FilterStage,
    length_metric: LengthMetric,
    simplify_tolerance: Option<f64>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a pipeline from a configuration
    pub fn from_config(config: &config::PipelineConfig) -> Self {
        builder::PipelineBuilder::from_config(config).build()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        tracer: Box<dyn ContourTracer>,
        scaler: Box<dyn CoordinateScaler>,
        area_filter: AreaFilter,
        filter_stage: FilterStage,
        length_metric: LengthMetric,
        simplify_tolerance: Option<f64>,
    ) -> Self {
        Self {
            tracer,
            scaler,
            area_filter,
            filter_stage,
            length_metric,
            simplify_tolerance,
        }
    }

    /// Convert a mask into slide-space shapes.
    ///
    /// The mask is binarized in place. A mask binarized by an earlier run
    /// keeps its first cutoff and `threshold` is ignored (logged at warn
    /// level). Contours that cannot form a polygon are dropped, and a mask
    /// without foreground yields an empty collection.
    pub fn run(&self, mask: &mut Mask, slide: ResolutionPair, threshold: Threshold) -> Result<ShapeCollection> {
        let span = info_span!("mask_to_shapes", width = mask.width(), height = mask.height());
        let _enter = span.enter();

        let mut stage = PipelineStage::Init;
        debug!(%stage, %threshold, percentage = mask.is_percentage());

        // Step 1: Binarize
        apply_threshold(mask, threshold.cutoff_for(mask.is_percentage()));
        stage = advance(stage, PipelineStage::Thresholded);

        // Step 2: Trace external contours
        let contours = self.tracer.trace(&mask.to_binary_image())?;
        stage = advance(stage, PipelineStage::Traced);
        debug!(count = contours.len(), "contours traced");

        // Step 3: Close contours into polygons, dropping degenerate ones
        let polygons: Vec<Polygon<f64>> = contours
            .iter()
            .filter_map(|contour| match build_polygon(contour) {
                Ok(polygon) => Some(polygon),
                Err(err) => {
                    debug!(%err, "dropping contour");
                    None
                }
            })
            .collect();
        stage = advance(stage, PipelineStage::Built);

        // Step 4: Map into slide space
        let factor = ScaleFactor::from_resolutions(slide, mask.width(), mask.height());
        let scaled: Vec<ScaledShape> = polygons
            .iter()
            .map(|polygon| ScaledShape {
                mask_area: polygon.unsigned_area(),
                polygon: self.scaler.scale_polygon(polygon, factor),
            })
            .collect();
        stage = advance(stage, PipelineStage::Scaled);

        // Step 5: Drop thresholding noise
        let candidates = scaled.len();
        let accepted = match self.filter_stage {
            FilterStage::BeforeScaling => {
                self.area_filter.retain(scaled, mask.area(), |shape| shape.mask_area)
            }
            FilterStage::AfterScaling => {
                self.area_filter.retain(scaled, slide.area(), |shape| shape.polygon.unsigned_area())
            }
        };
        stage = advance(stage, PipelineStage::Filtered);
        debug!(candidates, accepted = accepted.len(), "area filter applied");

        // Step 6: Measure
        let shapes: Vec<ShapeRecord> = accepted
            .iter()
            .map(|shape| {
                let polygon = match self.simplify_tolerance {
                    Some(tolerance) => simplify_polygon(&shape.polygon, tolerance),
                    None => shape.polygon.clone(),
                };
                ShapeRecord::from_polygon(&polygon, self.length_metric)
            })
            .collect();
        advance(stage, PipelineStage::Emitted);

        info!(
            shapes = shapes.len(),
            dropped = contours.len() - shapes.len(),
            "mask converted"
        );
        Ok(ShapeCollection { shapes })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: length={}, filter={} (min {}%), simplification={}",
            self.length_metric,
            self.filter_stage,
            self.area_filter.min_area_percent,
            self.simplify_tolerance.map_or_else(|| "off".to_string(), |t| t.to_string()),
        )
    }
}

fn advance(from: PipelineStage, to: PipelineStage) -> PipelineStage {
    debug_assert!(from < to, "stage {to} reached after {from}");
    debug!(stage = %to);
    to
}
