//! voc-tools: read, convert and inspect Pascal VOC annotation datasets.
//!
//! A VOC split (`train/` or `test/`) holds one XML annotation file per
//! image under `Annotations/`, the images under `JPEGImages/` and optional
//! caption files under `text/`. This crate parses those files into flat
//! records, batches them per directory and writes them out as CSV.
//!
//! # Modules
//!
//! - [`record`]: `Annotation` and `Caption` records and the `Record` contract
//! - [`io`]: directory walker, XML and caption parsers, bulk reader, CSV writer
//! - [`dataset`]: stateful `Dataset`/`VocDataset` facades and image metadata
//! - [`error`]: error types for voc-tools operations
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use voc_tools::dataset::{CsvExport, VocDataset};
//! use voc_tools::io::csv_out::WriteMode;
//!
//! let mut voc = VocDataset::new("sixray_data", false)?;
//! println!("classes: {:?}", voc.train.class_names()?);
//! voc.train.to_csv(Path::new("train.csv"), WriteMode::Overwrite)?;
//! # Ok::<(), voc_tools::VocError>(())
//! ```

pub mod dataset;
pub mod error;
pub mod io;
pub mod record;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::VocError;

use dataset::{CsvExport, Dataset};
use io::csv_out::WriteMode;
use io::{PathStyle, ReadOptions, SubDir};
use record::{Annotation, Record, DEFAULT_EMPTY_MARKER};

/// The voc-tools CLI application.
#[derive(Parser)]
#[command(name = "voc-tools")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Label given to files that contain no objects or captions.
    #[arg(
        long,
        global = true,
        env = "VOC_TOOLS_EMPTY_MARKER",
        default_value = DEFAULT_EMPTY_MARKER
    )]
    empty_marker: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the files of one subdirectory of a split.
    List(ListArgs),
    /// Print the annotations of a single XML, caption or image file.
    Show(ShowArgs),
    /// Print the distinct class names of a split.
    Classes(ClassesArgs),
    /// Export the annotations (and optionally captions) of a split to CSV.
    ToCsv(ToCsvArgs),
}

/// Arguments for the list subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Split directory (containing Annotations/, JPEGImages/, text/).
    split: PathBuf,

    /// Subdirectory to list ('annotations', 'images', or 'captions').
    #[arg(long, default_value = "annotations")]
    kind: String,

    /// Print full paths instead of file names.
    #[arg(long)]
    full_path: bool,
}

/// Arguments for the show subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// An .xml, .txt, .jpg or .jpeg file inside a split.
    file: PathBuf,

    /// Output format ('text', 'csv', or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the classes subcommand.
#[derive(clap::Args)]
struct ClassesArgs {
    /// Split directory.
    split: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the to-csv subcommand.
#[derive(clap::Args)]
struct ToCsvArgs {
    /// Split directory.
    split: PathBuf,

    /// Output CSV file for annotations.
    output: PathBuf,

    /// Append to the output files instead of overwriting them.
    #[arg(long)]
    append: bool,

    /// Append height,width,channels columns read from the images.
    #[arg(long)]
    with_images: bool,

    /// Also export captions to this CSV file.
    #[arg(long)]
    captions: Option<PathBuf>,
}

/// Run the voc-tools CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), VocError> {
    let cli = Cli::parse();
    let opts = ReadOptions::with_empty_marker(cli.empty_marker);

    match cli.command {
        Some(Commands::List(args)) => run_list(args),
        Some(Commands::Show(args)) => run_show(args, &opts),
        Some(Commands::Classes(args)) => run_classes(args, opts),
        Some(Commands::ToCsv(args)) => run_to_csv(args, opts),
        None => {
            println!("voc-tools {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Read, convert and inspect Pascal VOC datasets.");
            println!();
            println!("Run 'voc-tools --help' for usage information.");
            Ok(())
        }
    }
}

fn run_list(args: ListArgs) -> Result<(), VocError> {
    let subdir = match args.kind.as_str() {
        "annotations" | "xml" => SubDir::Annotations,
        "images" | "jpeg" => SubDir::Images,
        "captions" | "text" => SubDir::Captions,
        other => {
            return Err(VocError::UnsupportedFormat(format!(
                "'{}' (supported: annotations, images, captions)",
                other
            )));
        }
    };
    let style = if args.full_path {
        PathStyle::Full
    } else {
        PathStyle::FileName
    };

    for entry in io::list_dir(&args.split, subdir, style)? {
        println!("{}", entry?.display());
    }
    Ok(())
}

fn run_show(args: ShowArgs, opts: &ReadOptions) -> Result<(), VocError> {
    let annotations = io::reader::from_file(&args.file, opts)?;

    match args.output.as_str() {
        "text" => {
            for ann in annotations {
                println!("{}", ann);
            }
        }
        "csv" => {
            println!("{}", Annotation::csv_header());
            for ann in annotations {
                println!("{}", ann.csv());
            }
        }
        "json" => {
            for ann in annotations {
                println!("{}", serde_json::to_string(&ann)?);
            }
        }
        other => {
            return Err(VocError::UnsupportedFormat(format!(
                "'{}' (supported: text, csv, json)",
                other
            )));
        }
    }
    Ok(())
}

fn run_classes(args: ClassesArgs, opts: ReadOptions) -> Result<(), VocError> {
    let mut dataset = Dataset::with_options(&args.split, false, opts)?;
    let classes: BTreeSet<String> = dataset.class_names()?.into_iter().collect();

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&classes)?),
        _ => {
            for class in classes {
                println!("{}", class);
            }
        }
    }
    Ok(())
}

fn run_to_csv(args: ToCsvArgs, opts: ReadOptions) -> Result<(), VocError> {
    let mode = if args.append {
        WriteMode::Append
    } else {
        WriteMode::Overwrite
    };
    let mut dataset = Dataset::with_options(&args.split, args.captions.is_some(), opts)?;

    if args.with_images {
        dataset.to_csv_with_images(&args.output, mode)?;
    } else {
        dataset.to_csv(&args.output, mode)?;
    }
    println!("Wrote annotations to {}", args.output.display());

    if let (Some(path), Some(captions)) = (&args.captions, dataset.captions_mut()) {
        captions.to_csv(path, mode)?;
        println!("Wrote captions to {}", path.display());
    }
    Ok(())
}
