use crate::{
    pipeline::{Pipeline, config::PipelineConfig},
    traits::{ContourTracer, CoordinateScaler},
    algorithms::{
        AreaFilter,
        BorderFollowingTracer,
        FilterStage,
        LengthMetric,
        ScalingMode,
    },
};

/// Builder for creating conversion pipelines with a fluent API
pub struct PipelineBuilder {
    tracer: Option<Box<dyn ContourTracer>>,
    scaler: Option<Box<dyn CoordinateScaler>>,
    area_filter: AreaFilter,
    filter_stage: FilterStage,
    length_metric: LengthMetric,
    simplify_tolerance: Option<f64>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            tracer: None,
            scaler: None,
            area_filter: AreaFilter::default(),
            filter_stage: FilterStage::default(),
            length_metric: LengthMetric::default(),
            simplify_tolerance: None,
        }
    }

    /// Start from a configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        let builder = Self::new()
            .with_scaling(config.scaling)
            .with_length_metric(config.length_metric)
            .with_filter_stage(config.filter_stage)
            .with_min_area_percent(config.min_area_percent);
        match config.simplify_tolerance {
            Some(tolerance) => builder.with_simplification(tolerance),
            None => builder,
        }
    }

    /// Set the contour tracer (replaces any existing one)
    pub fn set_tracer<T>(mut self, tracer: T) -> Self
    where
        T: ContourTracer + 'static,
    {
        self.tracer = Some(Box::new(tracer));
        self
    }

    /// Set a custom coordinate scaler (replaces any existing one)
    pub fn set_scaler<S>(mut self, scaler: S) -> Self
    where
        S: CoordinateScaler + 'static,
    {
        self.scaler = Some(Box::new(scaler));
        self
    }

    /// Use one of the built-in scaling strategies
    pub fn with_scaling(mut self, mode: ScalingMode) -> Self {
        self.scaler = Some(mode.scaler());
        self
    }

    pub fn with_length_metric(mut self, metric: LengthMetric) -> Self {
        self.length_metric = metric;
        self
    }

    pub fn with_filter_stage(mut self, stage: FilterStage) -> Self {
        self.filter_stage = stage;
        self
    }

    pub fn with_min_area_percent(mut self, min_area_percent: f64) -> Self {
        self.area_filter = AreaFilter::new(min_area_percent);
        self
    }

    /// Add Douglas-Peucker simplification of the scaled polygons
    pub fn with_simplification(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = Some(tolerance);
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let tracer = self.tracer
            .unwrap_or_else(|| Box::new(BorderFollowingTracer));

        let scaler = self.scaler
            .unwrap_or_else(|| ScalingMode::default().scaler());

        Pipeline::new(
            tracer,
            scaler,
            self.area_filter,
            self.filter_stage,
            self.length_metric,
            self.simplify_tolerance,
        )
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
