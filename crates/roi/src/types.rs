use image::{GrayImage, ImageBuffer, Luma};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Intensity grid of a mask, one `f32` per mask pixel.
pub type MaskGrid = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Ordered boundary of one foreground region, as `[x, y]` pixel indices.
pub type Contour = Vec<[i32; 2]>;

/// Classifier output for one slide, at mask resolution.
#[derive(Debug, Clone)]
pub struct Mask {
    grid: MaskGrid,
    /// Values are encoded in `0..=100` instead of `0..=1`
    percentage: bool,
    /// Cutoff the grid was binarized with, if any
    binarized_at: Option<f32>,
}

impl Mask {
    pub fn new(grid: MaskGrid, percentage: bool) -> Self {
        Self {
            grid,
            percentage,
            binarized_at: None,
        }
    }

    /// Build a mask from row-major values. Returns `None` when `values`
    /// does not hold exactly `width * height` cells.
    pub fn from_values(width: u32, height: u32, values: Vec<f32>, percentage: bool) -> Option<Self> {
        MaskGrid::from_raw(width, height, values).map(|grid| Self::new(grid, percentage))
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Area of the mask grid in mask pixels.
    pub fn area(&self) -> f64 {
        f64::from(self.width()) * f64::from(self.height())
    }

    pub fn is_percentage(&self) -> bool {
        self.percentage
    }

    pub fn is_binarized(&self) -> bool {
        self.binarized_at.is_some()
    }

    pub fn binarization_cutoff(&self) -> Option<f32> {
        self.binarized_at
    }

    pub fn grid(&self) -> &MaskGrid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut MaskGrid {
        &mut self.grid
    }

    pub(crate) fn mark_binarized(&mut self, cutoff: f32) {
        self.binarized_at = Some(cutoff);
    }

    /// Foreground (non-zero) cells as 255, everything else as 0.
    pub fn to_binary_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            let value = self.grid.get_pixel(x, y).0[0];
            Luma([if value > 0.0 { 255u8 } else { 0u8 }])
        })
    }
}

/// Pixel resolution of the original slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolutionPair {
    pub width: u32,
    pub height: u32,
}

impl ResolutionPair {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

impl From<[u32; 2]> for ResolutionPair {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

/// One detected region in slide-pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapeRecord {
    /// Closed exterior ring, first point repeated at the end
    pub coordinates: Vec<[f64; 2]>,
    /// Largest linear extent, see [`crate::LengthMetric`]
    pub length: f64,
    /// Area in square slide pixels
    pub area: f64,
}

impl ShapeRecord {
    /// Axis-aligned bounds as `(min, max)` corners.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for &[x, y] in &self.coordinates {
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
        }
        (min, max)
    }
}

/// Document emitted by the converter: `{"shapes": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapeCollection {
    pub shapes: Vec<ShapeRecord>,
}

impl ShapeCollection {
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
