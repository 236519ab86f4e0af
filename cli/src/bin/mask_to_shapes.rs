use clap::Parser;
use cli::{ConfigOverrides, ConverterConfig, OutputTarget, make_subscriber};
use color_eyre::eyre::{Result, WrapErr, eyre};
use roi::{FilterStage, LengthMetric, MaskStore, OutputFormat, Pipeline, ScalingMode, Threshold};
use std::path::PathBuf;
use tracing::{Level, info};

/// Convert a slide mask into polygonal regions of interest in slide pixel coordinates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Mask store: a JSON document, or an image with a `<file>.attrs.json` sidecar
    #[arg(required_unless_present = "print_schema")]
    mask: Option<PathBuf>,

    /// Integer percentage (e.g. 50) or float probability (e.g. 0.5)
    #[arg(short, long, allow_hyphen_values = true, required_unless_present = "print_schema")]
    threshold: Option<Threshold>,

    /// Write the shapes to this file instead of stdout
    #[arg(short, long, conflicts_with = "default_out")]
    output: Option<PathBuf>,

    /// Write the shapes next to the mask, replacing its extension with .json
    #[arg(long)]
    default_out: bool,

    /// TOML or JSON configuration file; command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mask-to-slide coordinate mapping
    #[arg(long)]
    scaling: Option<ScalingMode>,

    /// Characteristic length reported per shape
    #[arg(long)]
    length: Option<LengthMetric>,

    /// Apply the minimum area filter in mask space or in slide space
    #[arg(long)]
    filter_stage: Option<FilterStage>,

    /// Minimum share of the reference area a shape must cover, in percent
    #[arg(long)]
    min_area: Option<f64>,

    /// Douglas-Peucker tolerance in slide pixels
    #[arg(long)]
    simplify: Option<f64>,

    /// Output document layout
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Minimum level of emitted log records
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,

    /// Append log records to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the configuration file JSON schema and exit
    #[arg(long)]
    print_schema: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            format: self.format,
            scaling: self.scaling,
            length_metric: self.length,
            filter_stage: self.filter_stage,
            min_area_percent: self.min_area,
            simplify_tolerance: self.simplify,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if cli.print_schema {
        println!("{}", ConverterConfig::schema_json()?);
        return Ok(());
    }

    let subscriber = make_subscriber(cli.log_level, cli.log_file.as_deref())
        .wrap_err("Failed to open log file")?;
    tracing::subscriber::with_default(subscriber, || run(&cli))
}

fn run(cli: &Cli) -> Result<()> {
    let (Some(mask_path), Some(threshold)) = (cli.mask.as_deref(), cli.threshold) else {
        return Err(eyre!("A mask path and a threshold are required"));
    };

    let config = match &cli.config {
        Some(path) => ConverterConfig::from_file(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => ConverterConfig::default(),
    };
    let config = cli.overrides().apply(config);

    info!("Reading mask store {}", mask_path.display());
    let (mut mask, slide) = MaskStore::open(mask_path)
        .wrap_err_with(|| format!("Failed to open mask store {}", mask_path.display()))?
        .into_parts();

    let shapes = Pipeline::from_config(&config.pipeline).run(&mut mask, slide, threshold)?;
    info!("Extracted {} shapes", shapes.len());

    match OutputTarget::resolve(cli.output.clone(), cli.default_out, mask_path) {
        OutputTarget::Stdout => shapes.write_to(std::io::stdout().lock(), config.format)?,
        OutputTarget::File(path) => {
            shapes
                .save(&path, config.format)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            info!("Shapes written to {}", path.display());
        }
    }

    Ok(())
}
