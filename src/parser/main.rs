use crate::classify::{classify_candidates, Thresholds};
use crate::dedup::dedup_hazards;
use crate::filters::filter_weak_fixes;
use crate::fuse::fuse_streams;
use crate::motion::{apply_heading_deltas, apply_rolling_speed, SPEED_AVG_WINDOW};
use crate::parser::sentence::parse_line;
use crate::route::{build_route, RouteOptions};
use crate::types::*;
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Tunable settings for the analysis passes run after fusion
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Hazard classification bands and suppression radii
    pub thresholds: Thresholds,
    /// Route thinning and gap segmentation settings
    pub route: RouteOptions,
}

/// Parse a GPS log file and run the full pipeline over it
///
/// Reads the file, collects the per-kind sentence streams, fuses them into
/// one fix sequence, derives the motion signals, classifies hazards and
/// builds the route polyline. An input with no usable fixes yields a
/// `TrackLog` with empty collections rather than an error.
pub fn parse_gps_file(file_path: &Path, options: &AnalysisOptions, debug: bool) -> Result<TrackLog> {
    if debug {
        println!("=== PARSING GPS LOG ===");
        let metadata = std::fs::metadata(file_path)?;
        println!(
            "File size: {} bytes ({:.2} KB)",
            metadata.len(),
            metadata.len() as f64 / 1024.0
        );
    }

    let text = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read GPS log: {:?}", file_path))?;

    let source = file_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown");

    parse_gps_str(&text, source, options, debug)
}

/// Parse GPS log text already held in memory and run the full pipeline
pub fn parse_gps_str(
    text: &str,
    source: &str,
    options: &AnalysisOptions,
    debug: bool,
) -> Result<TrackLog> {
    let mut stats = TrackStats::default();
    let mut streams = SentenceStreams::default();

    for line in text.lines() {
        stats.lines += 1;
        match parse_line(line, &mut streams) {
            Some(SentenceKind::Gga) => stats.gga_sentences += 1,
            Some(SentenceKind::Rmc) => stats.rmc_sentences += 1,
            Some(SentenceKind::Telemetry) => stats.telemetry_records += 1,
            None => stats.skipped_lines += 1,
        }
    }

    if debug {
        println!(
            "Collected {} GGA, {} RMC, {} telemetry record(s) from {} line(s), {} skipped",
            stats.gga_sentences,
            stats.rmc_sentences,
            stats.telemetry_records,
            stats.lines,
            stats.skipped_lines
        );
        if !streams.has_nmea_data() && !streams.telemetry.is_empty() {
            println!("No NMEA sentences collected, falling back to telemetry records");
        }
    }

    let mut fixes = fuse_streams(&streams, &mut stats);
    apply_heading_deltas(&mut fixes);
    apply_rolling_speed(&mut fixes, SPEED_AVG_WINDOW);

    if debug {
        println!("Fused {} fix(es)", fixes.len());
    }

    let candidates = classify_candidates(&fixes, &options.thresholds);
    if debug {
        println!(
            "Hazard candidates: {} stop(s), {} left turn(s), {} right turn(s)",
            candidates.stops.len(),
            candidates.left_turns.len(),
            candidates.right_turns.len()
        );
    }
    let hazards = dedup_hazards(candidates, &options.thresholds);

    let route_fixes = filter_weak_fixes(&fixes);
    let route = build_route(&route_fixes, &options.route);

    Ok(TrackLog {
        source: source.to_string(),
        stats,
        fixes,
        hazards,
        route,
    })
}
