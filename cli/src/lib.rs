use roi::{FilterStage, LengthMetric, OutputFormat, PipelineConfig, ScalingMode};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::writer::BoxMakeWriter,
};


#[derive(Error, Debug)]
pub enum ConverterError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}


/// Converter settings as read from a configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub format: OutputFormat,
    pub pipeline: PipelineConfig,
}

impl ConverterConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConverterError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConverterError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConverterError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ConverterError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConverterError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ConverterError::UnsupportedFileFormat),
        }
    }

    /// JSON schema of the configuration file
    pub fn schema_json() -> Result<String, ConverterError> {
        Ok(serde_json::to_string_pretty(&schemars::schema_for!(ConverterConfig))?)
    }
}

/// Command line values that take precedence over the configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub format: Option<OutputFormat>,
    pub scaling: Option<ScalingMode>,
    pub length_metric: Option<LengthMetric>,
    pub filter_stage: Option<FilterStage>,
    pub min_area_percent: Option<f64>,
    pub simplify_tolerance: Option<f64>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: ConverterConfig) -> ConverterConfig {
        if let Some(format) = self.format {
            config.format = format;
        }
        let pipeline = &mut config.pipeline;
        if let Some(scaling) = self.scaling {
            pipeline.scaling = scaling;
        }
        if let Some(metric) = self.length_metric {
            pipeline.length_metric = metric;
        }
        if let Some(stage) = self.filter_stage {
            pipeline.filter_stage = stage;
        }
        if let Some(min_area_percent) = self.min_area_percent {
            pipeline.min_area_percent = min_area_percent;
        }
        if self.simplify_tolerance.is_some() {
            pipeline.simplify_tolerance = self.simplify_tolerance;
        }
        config
    }
}

/// Where the serialized shapes go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// An explicit path wins; otherwise either stdout or a `.json` file next
    /// to the mask.
    pub fn resolve(explicit: Option<PathBuf>, next_to_mask: bool, mask_path: &Path) -> Self {
        match explicit {
            Some(path) => OutputTarget::File(path),
            None if next_to_mask => OutputTarget::File(default_output_path(mask_path)),
            None => OutputTarget::Stdout,
        }
    }
}

/// `slide.png` -> `slide.json`; a JSON mask store gets `slide.shapes.json`
/// so it is never overwritten.
pub fn default_output_path(mask_path: &Path) -> PathBuf {
    let is_json = mask_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        mask_path.with_extension("shapes.json")
    } else {
        mask_path.with_extension("json")
    }
}

/// Log subscriber writing to `log_file` (appending) or to stderr.
///
/// `RUST_LOG` directives refine the given level.
pub fn make_subscriber(
    level: Level,
    log_file: Option<&Path>,
) -> Result<impl Subscriber + Send + Sync + 'static, ConverterError> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .finish())
}
