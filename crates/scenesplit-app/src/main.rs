//! SceneSplit - split clips at scene changes and merge them back
//!
//! Entry point: argument parsing, logging and settings.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scenesplit_detect::Settings;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(
    name = "scenesplit",
    version,
    about = "Split clips at scene changes and merge contiguous pieces back",
    arg_required_else_help = true
)]
struct Cli {
    /// Settings file (defaults to <config dir>/scenesplit/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Partition a frame range at scene-change timestamps
    Partition(PartitionArgs),
    /// Detect scene changes in a media file
    Detect(DetectArgs),
    /// Split a media file into one record per scene
    Split(SplitArgs),
    /// Merge contiguous records read from a JSON file
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct PartitionArgs {
    /// Frames per second
    #[arg(long)]
    pub fps: f64,

    /// Total frames in the range
    #[arg(long)]
    pub frames: i64,

    /// Scene-change timestamps in seconds
    #[arg(value_name = "TIMESTAMP", allow_negative_numbers = true)]
    pub timestamps: Vec<f64>,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Media file to analyze
    pub file: PathBuf,

    /// Window start in seconds
    #[arg(long, default_value_t = 0.0)]
    pub start: f64,

    /// Window end in seconds (defaults to the probed duration)
    #[arg(long)]
    pub end: Option<f64>,

    /// Scene score threshold (defaults to the configured one)
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Media file to split
    pub file: PathBuf,

    /// Scene score threshold (defaults to the configured one)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Frame rate override, e.g. 24 or 30000/1001
    #[arg(long)]
    pub fps: Option<String>,

    /// Merge the resulting pieces back together afterwards
    #[arg(long)]
    pub merge: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// JSON file holding an array of records
    pub records: PathBuf,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::load()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let settings = load_settings(cli.config.as_ref())?;
    debug!(?settings, "Settings loaded");

    let output = match cli.command {
        Command::Partition(args) => commands::partition(&args)?,
        Command::Detect(args) => commands::detect(&args, &settings)?,
        Command::Split(args) => commands::split(&args, &settings)?,
        Command::Merge(args) => commands::merge(&args)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
