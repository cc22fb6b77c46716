//! Track Table Example
//!
//! Exports the fused fix table of one or more GPS driving logs as CSV for
//! spreadsheet analysis, one output file per log.

use anyhow::Result;
use clap::Parser;
use glob::glob;
use nmea_hazards::export::export_track_csv;
use nmea_hazards::{parse_gps_file, AnalysisOptions, ExportOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "track_csv")]
#[command(about = "Export fused GPS fix tables as CSV")]
struct Args {
    /// Input GPS logs or glob patterns (case-insensitive)
    files: Vec<String>,

    /// Directory for output files
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.files.is_empty() {
        eprintln!("Error: No input files specified");
        eprintln!("Usage: track_csv [OPTIONS] <FILES>...");
        eprintln!("Example: track_csv logs/*.txt --output-dir ./tables");
        std::process::exit(1);
    }

    // Expand glob patterns and collect all matching files
    let mut all_files = Vec::new();
    for pattern in &args.files {
        match glob(pattern) {
            Ok(paths) => {
                for entry in paths {
                    match entry {
                        Ok(path) => {
                            if is_gps_log(&path) {
                                all_files.push(path);
                            }
                        }
                        Err(e) => {
                            eprintln!("Warning: Error reading path in pattern '{}': {}", pattern, e)
                        }
                    }
                }
            }
            Err(e) => {
                eprintln!("Warning: Invalid glob pattern '{}': {}", pattern, e);
                // Try as direct file path
                let path = PathBuf::from(pattern);
                if path.exists() && is_gps_log(&path) {
                    all_files.push(path);
                }
            }
        }
    }

    if all_files.is_empty() {
        eprintln!("Error: No valid GPS logs found");
        std::process::exit(1);
    }

    // Sort files for consistent output
    all_files.sort();

    let export_opts = ExportOptions {
        track_csv: true,
        output_dir: args.output_dir.clone(),
        ..ExportOptions::default()
    };

    for file_path in &all_files {
        println!("Processing: {}", file_path.display());
        let track = parse_gps_file(file_path, &AnalysisOptions::default(), args.debug)?;
        if track.fixes.is_empty() {
            println!("⊘ No fixes in this log, skipping");
            continue;
        }
        export_track_csv(&track, file_path, &export_opts)?;
        println!();
    }

    Ok(())
}

/// Check for a GPS log extension (case-insensitive)
fn is_gps_log(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext_str = ext.to_string_lossy().to_lowercase();
        matches!(ext_str.as_str(), "txt" | "log" | "nmea")
    } else {
        false
    }
}
