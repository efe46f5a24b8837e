//! Stegdet CLI
//!
//! Command-line interface for LSB steganography detection: single-image
//! analysis with a per-plane statistics table, and batch directory
//! scanning with CSV/JSON report export.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stegdet::{
    analysis::ChannelAnalyzer,
    config::FileConfig,
    extraction::{plane_view, Plane},
    raster::{load_raster, Channel},
    report, scan,
};
use tracing::{error, info, warn};

/// Statistical detector for LSB steganography in raster images.
#[derive(Parser)]
#[command(name = "stegdet", version = stegdet::VERSION)]
#[command(about = "Detect LSB steganography in PNG/BMP images")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single image
    Analyze {
        /// Path to the image file
        image: PathBuf,

        /// Color channel to analyze
        #[arg(short, long, default_value = "blue")]
        channel: Channel,

        /// Save bit-plane visualizations next to the image
        #[arg(short = 'b', long)]
        save_bit_planes: bool,
    },

    /// Analyze all images in a directory
    Batch {
        /// Path to the directory containing images
        directory: PathBuf,

        /// Output format for the report
        #[arg(short, long, default_value = "csv")]
        format: ReportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Csv,
    Json,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("unknown format {s:?} (expected csv, json, or both)")),
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Analyze {
            image,
            channel,
            save_bit_planes,
        } => run_analyze(&image, channel, save_bit_planes, &config),
        Command::Batch { directory, format } => run_batch(&directory, format, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FileConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading configuration");
            Ok(FileConfig::from_file(p)?)
        }
        None => Ok(FileConfig::default()),
    }
}

fn run_analyze(
    image: &Path,
    channel: Channel,
    save_bit_planes: bool,
    config: &FileConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let raster = load_raster(image, &config.scan)?;
    println!("Analyzing image: {}", image.display());
    println!("Image size: {}x{} pixels", raster.width(), raster.height());

    let analyzer = ChannelAnalyzer::new(config.decoder.clone())?;
    let matrix = raster.channel(channel);
    let result = analyzer.analyze(&matrix, channel);

    match &result.message {
        Some(message) => {
            println!("\nHidden message found in {channel} channel:");
            println!("{}", "-".repeat(40));
            println!("{message}");
            println!("{}", "-".repeat(40));
        }
        None => {
            println!("\nNo obvious LSB message detected in {channel} channel.");
        }
    }

    println!("\nBit plane statistics:");
    println!("{:>5} | {:>10} | {:>10}", "Plane", "Entropy", "Chi2");
    println!("{}", "-".repeat(32));
    for stats in &result.plane_stats {
        println!(
            "{:>5} | {:>10.4} | {:>10.2}",
            stats.plane, stats.entropy, stats.chi2
        );
    }

    if save_bit_planes {
        let output_dir = bit_plane_dir(image);
        std::fs::create_dir_all(&output_dir)?;

        for plane in Plane::ALL {
            let view = plane_view(&matrix, plane);
            let path = output_dir.join(format!("plane_{plane}.png"));
            view.save(&path)?;
        }
        println!("\nBit plane visualizations saved to: {}", output_dir.display());
    }

    Ok(())
}

/// Output directory for plane visualizations: `<stem>_bit_planes` next to
/// the image.
fn bit_plane_dir(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    image
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{stem}_bit_planes"))
}

fn run_batch(
    directory: &Path,
    format: ReportFormat,
    config: &FileConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Scanning directory: {}", directory.display());
    let report = scan::scan_directory(directory, config)?;

    if report.total() == 0 {
        println!("No valid images found.");
        return Ok(());
    }

    println!("\nAnalyzed {} images:", report.results.len());
    for (i, result) in report.results.iter().enumerate() {
        if result.message_found {
            println!("{}. {}: Message found!", i + 1, result.file);
        } else {
            println!(
                "{}. {}: No message (Entropy: {:.2}, Chi2: {:.2})",
                i + 1,
                result.file,
                result.entropy_avg,
                result.chi2_max
            );
        }
    }

    if !report.failures.is_empty() {
        warn!("{} file(s) could not be analyzed", report.failures.len());
        for failure in &report.failures {
            warn!("  {failure}");
        }
    }

    if matches!(format, ReportFormat::Csv | ReportFormat::Both) {
        let csv_path = directory.join("stegdet_report.csv");
        report::export_csv(&report.results, &csv_path)?;
        println!("\nCSV report saved to: {}", csv_path.display());
    }

    if matches!(format, ReportFormat::Json | ReportFormat::Both) {
        let json_path = directory.join("stegdet_report.json");
        report::export_json(&report.results, &json_path)?;
        println!("\nJSON report saved to: {}", json_path.display());
    }

    Ok(())
}
