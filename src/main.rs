//! CLI binary for the NMEA hazards parser
//!
//! Processes one or more GPS driving logs, prints per-track statistics, and
//! writes the requested overlay and table exports next to the inputs or
//! into a chosen output directory.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use glob::glob;
use nmea_hazards::export::{export_hazards_kml, export_route_kml, KmlDocument};
use nmea_hazards::{parse_gps_file, should_skip_export, AnalysisOptions, ExportOptions, TrackLog};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Deepest directory nesting the input walk will follow
const MAX_RECURSION_DEPTH: usize = 100;

/// File name of the merged hazard document written for a whole batch
const MERGED_HAZARDS_NAME: &str = "Hazards.kml";

fn main() -> Result<()> {
    let command = Command::new("NMEA Hazards")
        .version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("VERGEN_GIT_SHA"),
            ", ",
            env!("VERGEN_BUILD_DATE"),
            ")"
        ))
        .about("Read NMEA-0183 GPS driving logs. Map stops and turns, output KML overlays.")
        .arg(
            Arg::new("files")
                .help("GPS logs to process (.txt, .log, .nmea extensions supported, case-insensitive; accepts files, directories and glob patterns)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("no-route")
                .long("no-route")
                .help("Skip writing the per-track route overlay")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-hazards")
                .long("no-hazards")
                .help("Skip writing the per-track hazard overlay")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("merged")
                .long("merged")
                .help("Also write one merged hazard overlay covering every processed log")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stop-radius")
                .long("stop-radius")
                .help("Suppression radius in meters for clustered stop points (default: 15)")
                .value_name("METERS")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("force-export")
                .long("force-export")
                .help("Export even when a track looks empty or idle")
                .action(clap::ArgAction::SetTrue),
        );

    #[cfg(feature = "csv")]
    let command = command.arg(
        Arg::new("csv")
            .long("csv")
            .help("Export the fused fix table to a .track.csv file")
            .action(clap::ArgAction::SetTrue),
    );

    #[cfg(feature = "json")]
    let command = command.arg(
        Arg::new("json")
            .long("json")
            .help("Export the hazard set to a .hazards.json file")
            .action(clap::ArgAction::SetTrue),
    );

    let matches = command.get_matches();

    let debug = matches.get_flag("debug");
    let output_dir = matches.get_one::<String>("output-dir").cloned();
    let file_patterns: Vec<&String> = matches.get_many::<String>("files").unwrap().collect();

    #[cfg(feature = "csv")]
    let export_csv = matches.get_flag("csv");
    #[cfg(not(feature = "csv"))]
    let export_csv = false;

    #[cfg(feature = "json")]
    let export_json = matches.get_flag("json");
    #[cfg(not(feature = "json"))]
    let export_json = false;

    let export_options = ExportOptions {
        route_kml: !matches.get_flag("no-route"),
        hazards_kml: !matches.get_flag("no-hazards"),
        track_csv: export_csv,
        hazards_json: export_json,
        output_dir: output_dir.clone(),
        force_export: matches.get_flag("force-export"),
    };

    let mut analysis_options = AnalysisOptions::default();
    if let Some(&radius) = matches.get_one::<f64>("stop-radius") {
        analysis_options.thresholds.stop_radius_m = radius;
    }

    if debug {
        println!("Input patterns: {file_patterns:?}");
    }

    let patterns: Vec<String> = file_patterns.iter().map(|s| s.to_string()).collect();
    let input_files = gather_input_files(&patterns)?;

    let valid_paths: Vec<PathBuf> = input_files
        .into_iter()
        .filter(|path| {
            if has_supported_extension(path) {
                true
            } else {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                false
            }
        })
        .collect();

    if debug {
        println!("Found {} valid files to process", valid_paths.len());
    }

    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .txt, .log, .nmea (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut merged = matches.get_flag("merged").then(KmlDocument::new);
    let mut processed_files = 0;

    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        let track = match parse_gps_file(path, &analysis_options, debug) {
            Ok(track) => track,
            Err(e) => {
                eprintln!("Error processing {filename}: {e}");
                eprintln!("Continuing with next file...");
                continue;
            }
        };
        processed_files += 1;

        display_track_info(&track);

        let (skip, reason) = should_skip_export(&track, export_options.force_export);
        if skip {
            println!("Skipping export for {filename}: {reason}");
            continue;
        }

        if export_options.route_kml {
            if let Err(e) = export_route_kml(&track, path, &export_options) {
                eprintln!("Warning: Failed to export route overlay: {e}");
            }
        }
        if export_options.hazards_kml {
            if let Err(e) = export_hazards_kml(&track, path, &export_options) {
                eprintln!("Warning: Failed to export hazard overlay: {e}");
            }
        }

        #[cfg(feature = "csv")]
        if export_options.track_csv {
            if let Err(e) = nmea_hazards::export::export_track_csv(&track, path, &export_options) {
                eprintln!("Warning: Failed to export track table: {e}");
            }
        }

        #[cfg(feature = "json")]
        if export_options.hazards_json {
            if let Err(e) = nmea_hazards::export::export_hazards_json(&track, path, &export_options)
            {
                eprintln!("Warning: Failed to export hazards JSON: {e}");
            }
        }

        if let Some(document) = merged.as_mut() {
            document.add_hazards(&track.hazards);
        }
    }

    if let Some(document) = merged {
        if document.is_empty() {
            println!("\nNo hazards detected across the batch, merged overlay not written");
        } else {
            let merged_path = output_dir
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(MERGED_HAZARDS_NAME);
            document.write_to(&merged_path)?;
            println!(
                "\nExported merged hazards ({} placemarks) to: {}",
                document.placemark_count(),
                merged_path.display()
            );
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("This could be due to:");
        eprintln!("  - Files not containing NMEA sentences or telemetry records");
        eprintln!("  - Corrupted or empty files");
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}

/// Expand the command-line inputs into the list of log files to process
///
/// A plain file path is taken as given, a directory is walked recursively
/// for supported extensions, and a pattern containing `*` or `?` is run
/// through glob before either rule applies. Every result is canonicalized,
/// and a file lands in the batch once no matter how many inputs reach it.
/// Directory findings come back sorted; the inputs themselves keep their
/// command-line order.
fn gather_input_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut visited = HashSet::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            let matches =
                glob(pattern).with_context(|| format!("Invalid glob pattern '{pattern}'"))?;
            for entry in matches {
                let path =
                    entry.with_context(|| format!("Error expanding glob pattern '{pattern}'"))?;
                collect_input(&path, &mut visited, 0, &mut found);
            }
        } else {
            collect_input(Path::new(pattern), &mut visited, 0, &mut found);
        }
    }

    Ok(found)
}

/// Add one expanded input to the batch, descending into directories
///
/// Unreadable paths warn and are skipped so a single bad entry cannot
/// sink the whole batch. The visited set doubles as the symlink-cycle
/// and duplicate guard, and nesting past [`MAX_RECURSION_DEPTH`] is
/// abandoned with a warning.
fn collect_input(
    path: &Path,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
    found: &mut Vec<PathBuf>,
) {
    if depth > MAX_RECURSION_DEPTH {
        eprintln!(
            "Warning: Skipping '{}': nested deeper than {} levels",
            path.display(),
            MAX_RECURSION_DEPTH
        );
        return;
    }

    let canonical = match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(e) => {
            eprintln!("Warning: Cannot access '{}': {}", path.display(), e);
            return;
        }
    };
    if !visited.insert(canonical.clone()) {
        return;
    }

    if canonical.is_file() {
        found.push(canonical);
        return;
    }
    if !canonical.is_dir() {
        eprintln!(
            "Warning: Path not found or not accessible: {}",
            path.display()
        );
        return;
    }

    let entries = match fs::read_dir(&canonical) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!(
                "Warning: Cannot read directory '{}': {}",
                canonical.display(),
                e
            );
            return;
        }
    };

    let mut children: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                eprintln!(
                    "Warning: Cannot read entry in directory '{}': {}",
                    canonical.display(),
                    e
                );
                None
            }
        })
        .collect();
    children.sort();

    for child in children {
        if child.is_dir() || has_supported_extension(&child) {
            collect_input(&child, visited, depth + 1, found);
        }
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_ascii_lowercase();
            ext_lower == "txt" || ext_lower == "log" || ext_lower == "nmea"
        })
        .unwrap_or(false)
}

fn display_track_info(track: &TrackLog) {
    let stats = &track.stats;

    println!("\nTrack: {}, fixes: {}", track.source, stats.fused_fixes);

    // Display statistics
    println!("\nStatistics");
    println!("Lines       {:6}", stats.lines);
    println!("GGA         {:6}", stats.gga_sentences);
    println!("RMC         {:6}", stats.rmc_sentences);
    if stats.telemetry_records > 0 {
        println!("Telemetry   {:6}", stats.telemetry_records);
    }
    if stats.skipped_lines > 0 {
        println!("Skipped     {:6}", stats.skipped_lines);
    }
    if stats.duplicate_times > 0 {
        println!("Duplicates  {:6}", stats.duplicate_times);
    }
    println!("Fixes       {:6}", stats.fused_fixes);
    println!("Stops       {:6}", track.hazards.stops.len());
    println!("Left turns  {:6}", track.hazards.left_turns.len());
    println!("Right turns {:6}", track.hazards.right_turns.len());
    println!("Route pts   {:6}", track.route_point_count());

    // Display timing if available
    let total_seconds = track.duration_seconds();
    if total_seconds > 0.0 {
        let minutes = (total_seconds / 60.0) as u32;
        let seconds = total_seconds % 60.0;

        if minutes > 0 {
            println!("Duration    {:02}m{:04.1}s", minutes, seconds);
        } else {
            println!("Duration    {:04.1}s", seconds);
        }
    }
}
