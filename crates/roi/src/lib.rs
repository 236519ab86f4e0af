//! # Slide ROI Extraction Library
//!
//! Turns the probability mask of a tissue/tumor classifier into polygonal
//! regions of interest expressed in whole-slide pixel coordinates.
//!
//! ## Core Features
//!
//! - **Thresholding**: in-place binarization of percentage or probability masks
//! - **External contours**: Suzuki-Abe border following, holes discarded
//! - **Noise filter**: drops regions below a share of the mask area
//! - **Reprojection**: pluggable mask-to-slide coordinate scaling strategies
//! - **Metrics**: shoelace area and enclosing-circle or rotated-rectangle length
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roi::{MaskStore, Pipeline, Threshold};
//!
//! let (mut mask, slide) = MaskStore::open("slide_tumor.json")?.into_parts();
//! let shapes = Pipeline::builder().build().run(&mut mask, slide, Threshold::Percent(50))?;
//! println!("{}", shapes.to_json_string()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust
//! use roi::{FilterStage, LengthMetric, Pipeline, ScalingMode};
//!
//! let pipeline = Pipeline::builder()
//!     .with_scaling(ScalingMode::Naive)
//!     .with_length_metric(LengthMetric::RotatedRectangle)
//!     .with_filter_stage(FilterStage::AfterScaling)
//!     .with_simplification(2.0)
//!     .build();
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;
pub mod store;

// Re-exports for convenience
pub use error::{ParseThresholdError, Result, RoiError};
pub use types::{Contour, Mask, MaskGrid, ResolutionPair, ShapeCollection, ShapeRecord};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, PipelineStage, builder::PipelineBuilder, config::PipelineConfig};
pub use io::OutputFormat;
pub use store::MaskStore;

/// Threshold `mask`, extract its regions and express them in slide pixels
/// using the default pipeline.
pub fn convert_to_shapes(mask: &mut Mask, slide: ResolutionPair, threshold: Threshold) -> Result<ShapeCollection> {
    Pipeline::builder().build().run(mask, slide, threshold)
}
