//! Labelmap: recover YOLO class names from a parallel annotation set.
//!
//! Given one tree of original annotations (`label x1 y1 x2 y2` per line) and
//! one tree of YOLO annotations (`class_id cx cy w h` per line) for the same
//! images, labelmap pairs boxes by IoU and votes on which label each class id
//! stands for.
//!
//! # Modules
//!
//! - [`ir`]: Box, class id and record types, plus the line-oriented loaders
//! - [`pairing`]: Collecting annotation files and pairing them by base key
//! - [`matching`]: IoU-based one-to-one box matching
//! - [`mapping`]: Vote aggregation and mapping export
//! - [`discover`]: The end-to-end discovery pipeline and its report
//! - [`evaluate`]: Empty-vs-non-empty classification metrics over detection records
//! - [`error`]: Error types for labelmap operations

pub mod discover;
pub mod error;
pub mod evaluate;
pub mod ir;
pub mod mapping;
pub mod matching;
pub mod pairing;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::LabelmapError;

/// The labelmap CLI application.
#[derive(Parser)]
#[command(name = "labelmap")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Discover which label each YOLO class id stands for.
    Discover(DiscoverArgs),
    /// Score detection results as an empty-vs-non-empty classifier.
    Evaluate(EvaluateArgs),
    /// Write a single detection record to a JSONL file.
    Record(RecordArgs),
}

/// Arguments for the discover subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Root of the original `label x1 y1 x2 y2` annotations.
    original_root: PathBuf,

    /// Root of the YOLO `class_id cx cy w h` annotations.
    yolo_root: PathBuf,

    /// Suffix stripped from original annotation file names.
    #[arg(long, default_value = "_anno.txt")]
    orig_suffix: String,

    /// Suffix stripped from YOLO annotation file names.
    #[arg(long, default_value = ".txt")]
    yolo_suffix: String,

    /// Minimum IoU for two boxes to count as the same object.
    #[arg(long, env = "LABELMAP_MIN_IOU", default_value_t = discover::DEFAULT_MIN_IOU)]
    min_iou: f64,

    /// Only inspect the first N shared samples (0 means all).
    #[arg(long)]
    limit: Option<usize>,

    /// Write the discovered mapping here (JSON, or data.yaml style for .yaml/.yml).
    #[arg(long, alias = "output-json")]
    mapping: Option<PathBuf>,

    /// Scale YOLO boxes to pixels using a fixed image size, e.g. 1920x1080.
    #[arg(long, conflicts_with = "images_root")]
    image_size: Option<String>,

    /// Scale YOLO boxes to pixels using image files found under this directory.
    #[arg(long)]
    images_root: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the evaluate subcommand.
#[derive(clap::Args)]
struct EvaluateArgs {
    /// JSONL file of detection records.
    results: PathBuf,

    /// Regex on the image path marking samples that contain objects.
    #[arg(long)]
    positive_regex: String,

    /// Regex on the image path marking samples that contain none.
    #[arg(long)]
    negative_regex: Option<String>,

    /// How to treat samples matching neither regex ('skip', 'positive' or 'negative').
    #[arg(long, default_value = "skip")]
    unmatched_policy: String,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the record subcommand.
#[derive(clap::Args)]
struct RecordArgs {
    /// Image the detections belong to. Only its file name is stored.
    image_path: PathBuf,

    /// JSON array of detections.
    detections_json: String,

    /// JSONL file to write.
    #[arg(default_value = "results.jsonl")]
    output: PathBuf,
}

/// Run the labelmap CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelmapError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Discover(args)) => run_discover(args),
        Some(Commands::Evaluate(args)) => run_evaluate(args),
        Some(Commands::Record(args)) => run_record(args),
        None => {
            println!("labelmap {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Recover YOLO class names from a parallel annotation set.");
            println!();
            println!("Run 'labelmap --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the discover subcommand.
fn run_discover(args: DiscoverArgs) -> Result<(), LabelmapError> {
    if !(0.0..=1.0).contains(&args.min_iou) {
        return Err(LabelmapError::InvalidOption(format!(
            "--min-iou must be between 0 and 1, got {}",
            args.min_iou
        )));
    }
    let output = OutputFormat::parse(&args.output)?;

    let denormalize = match (args.image_size.as_deref(), args.images_root) {
        (Some(size), _) => {
            let (width, height) = parse_image_size(size)?;
            discover::Denormalize::Fixed { width, height }
        }
        (None, Some(root)) => discover::Denormalize::ImagesRoot(root),
        (None, None) => discover::Denormalize::None,
    };

    let opts = discover::DiscoverOptions {
        original_root: args.original_root,
        yolo_root: args.yolo_root,
        orig_suffix: args.orig_suffix,
        yolo_suffix: args.yolo_suffix,
        min_iou: args.min_iou,
        limit: args.limit,
        denormalize,
    };

    let report = discover::discover_label_mapping(&opts)?;

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", report),
    }

    if let Some(path) = args.mapping {
        if report.outcome() == discover::DiscoveryOutcome::Mapped {
            mapping::write_mapping(&path, &report.mapping.label_map())?;
            if output == OutputFormat::Text {
                println!();
                println!("Mapping written to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Execute the evaluate subcommand.
fn run_evaluate(args: EvaluateArgs) -> Result<(), LabelmapError> {
    let output = OutputFormat::parse(&args.output)?;
    let policy: evaluate::UnmatchedPolicy = args.unmatched_policy.parse()?;
    let opts = evaluate::EvaluateOptions::new(
        &args.positive_regex,
        args.negative_regex.as_deref(),
        policy,
    )?;

    if !args.results.is_file() {
        return Err(LabelmapError::ResultsNotFound { path: args.results });
    }

    let loaded = ir::io_jsonl::read_detection_records(&args.results)?;
    for warning in &loaded.warnings {
        log::warn!("{warning}");
    }

    if loaded.items.is_empty() {
        println!("No detections loaded from the results file.");
        return Ok(());
    }

    let report = evaluate::evaluate_classification(&loaded.items, &opts);
    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", report),
    }

    Ok(())
}

/// Execute the record subcommand.
fn run_record(args: RecordArgs) -> Result<(), LabelmapError> {
    let record = ir::io_jsonl::single_record(&args.image_path, &args.detections_json)?;
    ir::io_jsonl::write_detection_records(&args.output, std::slice::from_ref(&record))?;

    println!(
        "Created {} with detection for {}",
        args.output.display(),
        record.image
    );
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(raw: &str) -> Result<Self, LabelmapError> {
        match raw {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(LabelmapError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            ))),
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), LabelmapError> {
    let json = serde_json::to_string_pretty(value).map_err(LabelmapError::ReportJson)?;
    println!("{json}");
    Ok(())
}

/// Parse `<width>x<height>` into positive pixel dimensions.
fn parse_image_size(raw: &str) -> Result<(u32, u32), LabelmapError> {
    let invalid = || {
        LabelmapError::InvalidOption(format!("--image-size expects <width>x<height>, got '{raw}'"))
    };

    let (w, h) = raw.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}
