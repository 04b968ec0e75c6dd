//! Framecheck: full-body photo framing checks from pose keypoints.
//!
//! Framecheck decides whether a photo shows one person's whole body at a
//! usable distance, or names the single most important framing defect
//! (head cut off, feet out of frame, standing too far away, ...). It works on
//! the 17 COCO body keypoints a pose detector produces; running the detector
//! itself is left to an external [`provider::KeypointProvider`].
//!
//! # Modules
//!
//! - [`framing`]: The framing classifier and its measurement report
//! - [`pose`]: Keypoint types and detector output readers
//! - [`status`]: Status codes and the `{"status": ...}` response
//! - [`provider`]: Keypoint provider trait and implementations
//! - [`service`]: Provider-owning boundary mapping every outcome to a status
//! - [`batch`]: Directory-wide checks
//! - [`config`]: Provider configuration
//! - [`error`]: Error types for framecheck operations

pub mod batch;
pub mod config;
pub mod error;
pub mod framing;
pub mod pose;
pub mod provider;
pub mod service;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::FramecheckError;

use config::{ProviderConfig, ENV_FORMAT, ENV_KEYPOINTS_DIR, ENV_SIDECAR_SUFFIX};
use pose::KeypointFormat;
use service::{CheckOutcome, FramingService};
use status::{StatusCode, StatusResponse};

/// The framecheck CLI application.
#[derive(Parser)]
#[command(name = "framecheck")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Classify the framing of a recorded detector output file.
    Classify(ClassifyArgs),
    /// Check the framing of one image.
    Check(CheckArgs),
    /// Check the framing of every image under a directory.
    Batch(BatchArgs),
}

/// Arguments for the classify subcommand.
#[derive(clap::Args)]
struct ClassifyArgs {
    /// Detector output file to classify.
    input: PathBuf,

    /// Input format ('json' or 'coco').
    #[arg(long, default_value = "json")]
    format: String,

    /// Image width in pixels, for 'coco' files that do not record it.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Image height in pixels, for 'coco' files that do not record it.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Exit non-zero unless the status is OK.
    #[arg(long)]
    strict: bool,

    /// Output format ('json' or 'text').
    #[arg(long, default_value = "json")]
    output: String,
}

/// Where recorded keypoints are looked up.
#[derive(clap::Args)]
struct ProviderArgs {
    /// Directory holding keypoint sidecars (default: next to each image).
    #[arg(long, env = ENV_KEYPOINTS_DIR)]
    keypoints_dir: Option<PathBuf>,

    /// Suffix appended to the image file name to find its sidecar.
    #[arg(long, env = ENV_SIDECAR_SUFFIX, default_value = config::DEFAULT_SIDECAR_SUFFIX)]
    sidecar_suffix: String,

    /// Sidecar format ('json' or 'coco').
    #[arg(long, env = ENV_FORMAT, default_value = "json")]
    format: String,
}

impl ProviderArgs {
    fn into_config(self) -> Result<ProviderConfig, FramecheckError> {
        Ok(ProviderConfig {
            keypoints_dir: self.keypoints_dir,
            sidecar_suffix: self.sidecar_suffix,
            format: self.format.parse()?,
        })
    }
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Image to check.
    image: PathBuf,

    #[command(flatten)]
    provider: ProviderArgs,

    /// Exit non-zero unless the status is OK.
    #[arg(long)]
    strict: bool,

    /// Output format ('json' or 'text').
    #[arg(long, default_value = "json")]
    output: String,
}

/// Arguments for the batch subcommand.
#[derive(clap::Args)]
struct BatchArgs {
    /// Directory of images to check.
    dir: PathBuf,

    #[command(flatten)]
    provider: ProviderArgs,

    /// Only check images directly inside the directory.
    #[arg(long)]
    no_recursive: bool,

    /// Exit non-zero if any image is not OK.
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text', 'json', or 'csv').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the framecheck CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FramecheckError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify(args)) => run_classify(args),
        Some(Commands::Check(args)) => run_check(args),
        Some(Commands::Batch(args)) => run_batch(args),
        None => {
            println!("framecheck {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Full-body photo framing checks from pose keypoints.");
            println!();
            println!("Run 'framecheck --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the classify subcommand.
fn run_classify(args: ClassifyArgs) -> Result<(), FramecheckError> {
    let format: KeypointFormat = args.format.parse()?;
    let dims = args.width.zip(args.height);
    let output = format.read(&args.input, dims)?;

    let report = framing::assess(output.primary());
    match args.output.as_str() {
        "json" => print_status(report.status.into())?,
        "text" => print!("{}", report),
        other => return Err(unsupported_output(other, "json, text")),
    }

    finish(report.status.into(), args.strict)
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), FramecheckError> {
    let service = FramingService::from_config(args.provider.into_config()?);
    let outcome = service.assess_file(&args.image);

    match args.output.as_str() {
        "json" => print_status(outcome.status)?,
        "text" => print_outcome(&outcome),
        other => return Err(unsupported_output(other, "json, text")),
    }

    finish(outcome.status, args.strict)
}

/// Execute the batch subcommand.
fn run_batch(args: BatchArgs) -> Result<(), FramecheckError> {
    let service = FramingService::from_config(args.provider.into_config()?);
    let opts = batch::BatchOptions {
        recursive: !args.no_recursive,
        ..batch::BatchOptions::default()
    };
    let report = batch::check_directory(&service, &args.dir, &opts)?;

    match args.output.as_str() {
        "text" => print!("{}", report),
        "json" => println!("{}", report.to_json_string()?),
        "csv" => print!("{}", report.to_csv_string()?),
        other => return Err(unsupported_output(other, "text, json, csv")),
    }

    if args.strict && report.rejected_count() > 0 {
        Err(FramecheckError::BatchRejected {
            rejected: report.rejected_count(),
            total: report.total(),
        })
    } else {
        Ok(())
    }
}

fn print_status(status: StatusCode) -> Result<(), FramecheckError> {
    println!("{}", serde_json::to_string(&StatusResponse::new(status))?);
    Ok(())
}

fn print_outcome(outcome: &CheckOutcome) {
    match (&outcome.report, &outcome.failure) {
        (Some(report), _) => print!("{}", report),
        (None, Some(failure)) => {
            println!("Framing: {}", outcome.status);
            println!("  {}", outcome.status.guidance());
            println!();
            println!("  {}", failure);
        }
        (None, None) => println!("Framing: {}", outcome.status),
    }
}

fn unsupported_output(requested: &str, supported: &str) -> FramecheckError {
    FramecheckError::UnsupportedFormat(format!(
        "output '{}' (supported: {})",
        requested, supported
    ))
}

fn finish(status: StatusCode, strict: bool) -> Result<(), FramecheckError> {
    if strict && !status.is_ok() {
        Err(FramecheckError::FramingRejected { status })
    } else {
        Ok(())
    }
}
