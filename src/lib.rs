//! Annokit: the geometric kernel of a dataset-annotation toolkit.
//!
//! Annokit defines how spatial labels (2D and oriented 3D boxes, polygons,
//! run-length masks, polylines and keypoints) are represented, constructed,
//! measured, compared and encoded. Around that kernel it provides a JSON
//! label-document format, a validator and a small CLI.
//!
//! # Modules
//!
//! - [`geometry`]: the kernel value types and algorithms
//! - [`label`]: label documents and their mapping to kernel types
//! - [`validation`]: document validation and error reporting
//! - [`measure`]: per-label area/volume/length reports
//! - [`error`]: error types for annokit operations

pub mod error;
pub mod geometry;
pub mod label;
pub mod measure;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

pub use error::{AnnokitError, GeometryError};

use geometry::{rle, BinaryMask, Polyline2D, Rle, Vector2D, VisibilityScheme};
use label::{LabelContext, LabelSet};

/// The annokit CLI application.
#[derive(Parser)]
#[command(name = "annokit")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a label document for errors and warnings.
    Validate(ValidateArgs),
    /// Report area, volume and length of every label.
    Measure(MeasureArgs),
    /// Run-length encode or decode a binary mask.
    #[command(subcommand)]
    Rle(RleCommands),
    /// Compare two polylines with the Fréchet-based similarity score.
    Similarity(SimilarityArgs),
}

#[derive(Subcommand)]
enum RleCommands {
    /// Encode a mask (JSON array of rows) into run lengths.
    Encode(RleEncodeArgs),
    /// Decode run lengths (JSON array) into a mask.
    Decode(RleDecodeArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Catalog settings shared by the document commands.
#[derive(clap::Args)]
struct CatalogArgs {
    /// Visibility scheme for keypoints ('binary' or 'ternary').
    #[arg(long, env = "ANNOKIT_VISIBILITY")]
    visibility: Option<VisibilityScheme>,

    /// Polylines are Bézier curves and carry beizerPointTypes.
    #[arg(long, env = "ANNOKIT_BEZIER")]
    bezier: bool,
}

impl CatalogArgs {
    fn context(&self) -> LabelContext {
        LabelContext {
            visibility: self.visibility,
            bezier_curve: self.bezier,
        }
    }
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Label document to validate.
    input: PathBuf,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(clap::Args)]
struct MeasureArgs {
    /// Label document to measure.
    input: PathBuf,

    #[command(flatten)]
    catalog: CatalogArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(clap::Args)]
struct RleEncodeArgs {
    /// JSON file holding the mask as an array of rows of integers.
    input: PathBuf,

    /// Label value to select; by default every non-zero pixel is foreground.
    #[arg(long)]
    label: Option<u16>,
}

#[derive(clap::Args)]
struct RleDecodeArgs {
    /// JSON file holding an array of run lengths.
    input: PathBuf,

    #[arg(long)]
    width: usize,

    #[arg(long)]
    height: usize,
}

#[derive(clap::Args)]
struct SimilarityArgs {
    /// First polyline: JSON array of {"x", "y"} points.
    first: PathBuf,

    /// Second polyline: JSON array of {"x", "y"} points.
    second: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// Run the annokit CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AnnokitError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Measure(args)) => run_measure(args),
        Some(Commands::Rle(RleCommands::Encode(args))) => run_rle_encode(args),
        Some(Commands::Rle(RleCommands::Decode(args))) => run_rle_decode(args),
        Some(Commands::Similarity(args)) => run_similarity(args),
        None => {
            println!("annokit {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Geometry kernel and tooling for annotation labels.");
            println!();
            println!("Run 'annokit --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), AnnokitError> {
    let doc = label::io_json::read_label_json(&args.input)?;
    tracing::debug!(
        path = %args.input.display(),
        labels = doc.label_count(),
        "loaded label document"
    );

    let opts = validation::ValidateOptions {
        strict: args.strict,
        context: args.catalog.context(),
    };
    let report = validation::validate_document(&doc, &opts);

    match args.output {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct JsonReport<'a> {
                error_count: usize,
                warning_count: usize,
                issues: &'a [validation::ValidationIssue],
            }
            let json = JsonReport {
                error_count: report.error_count(),
                warning_count: report.warning_count(),
                issues: &report.issues,
            };
            print_json(&json)?;
        }
        OutputFormat::Text => print!("{}", report),
    }

    tracing::info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );

    if !report.is_ok() || (opts.strict && !report.is_clean()) {
        Err(AnnokitError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the measure subcommand.
fn run_measure(args: MeasureArgs) -> Result<(), AnnokitError> {
    let doc = label::io_json::read_label_json(&args.input)?;
    let set = LabelSet::from_document(&doc, &args.catalog.context())?;
    let report = measure::measure_labels(&set);
    tracing::debug!(labels = report.labels.len(), "measured labels");

    match args.output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", report),
    }
    Ok(())
}

fn run_rle_encode(args: RleEncodeArgs) -> Result<(), AnnokitError> {
    let rows: Vec<Vec<u16>> = label::io_json::read_json(&args.input)?;
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    if let Some(idx) = rows.iter().position(|row| row.len() != width) {
        return Err(GeometryError::Validation(format!(
            "mask row {} in {} is not {} pixel(s) wide",
            idx,
            args.input.display(),
            width
        ))
        .into());
    }
    let raster = rows.concat();

    let mask = match args.label {
        Some(label) => BinaryMask::from_label_raster(width, height, &raster, label)?,
        None => BinaryMask::from_pixels(width, height, raster.iter().map(|&v| v != 0).collect())?,
    };
    let encoded = rle::encode(&mask);
    tracing::debug!(width, height, runs = encoded.counts().len(), "encoded mask");

    #[derive(Serialize)]
    struct Encoded<'a> {
        width: usize,
        height: usize,
        rle: &'a [u64],
    }
    print_json(&Encoded {
        width,
        height,
        rle: encoded.counts(),
    })
}

fn run_rle_decode(args: RleDecodeArgs) -> Result<(), AnnokitError> {
    let counts: Vec<u64> = label::io_json::read_json(&args.input)?;
    let mask = rle::decode(&Rle::new(counts), args.width, args.height)?;
    let rows: Vec<Vec<u8>> = mask
        .to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(u8::from).collect())
        .collect();
    print_json(&rows)
}

fn run_similarity(args: SimilarityArgs) -> Result<(), AnnokitError> {
    let first: Vec<Vector2D> = label::io_json::read_json(&args.first)?;
    let second: Vec<Vector2D> = label::io_json::read_json(&args.second)?;
    let p = Polyline2D::new(first)?;
    let q = Polyline2D::new(second)?;

    let distance = geometry::uniform_frechet_distance(&p, &q);
    let score = geometry::similarity(&p, &q);

    match args.output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "frechet_distance": distance,
            "similarity": score,
        }))?,
        OutputFormat::Text => {
            println!("Fréchet distance: {}", distance);
            println!("Similarity:       {}", score);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AnnokitError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| AnnokitError::JsonWrite {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    println!("{}", json);
    Ok(())
}
