//! Hazard Overlay Example
//!
//! Demonstrates how to parse a GPS driving log and export the detected
//! stops and turns alongside the route polyline as KML overlays.

use nmea_hazards::export::{export_hazards_kml, export_route_kml};
use nmea_hazards::{parse_gps_file, AnalysisOptions, ExportOptions};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Get input file from command line or show usage
    let input_file = std::env::args().nth(1).unwrap_or_else(|| {
        println!("Usage: hazard_export <drive.txt> [output_dir]");
        println!("Example: hazard_export logs/commute.txt ./overlays");
        std::process::exit(1);
    });

    // Get optional output directory from command line
    let output_dir = std::env::args().nth(2);

    let export_opts = ExportOptions {
        route_kml: true,
        hazards_kml: true,
        output_dir,
        ..ExportOptions::default()
    };

    println!("Parsing: {}", input_file);
    let input_path = Path::new(&input_file);
    let track = parse_gps_file(input_path, &AnalysisOptions::default(), false)?;

    println!("\nTrack Information:");
    println!("  Fused fixes: {}", track.fixes.len());
    println!("  Stops: {}", track.hazards.stops.len());
    println!("  Left turns: {}", track.hazards.left_turns.len());
    println!("  Right turns: {}", track.hazards.right_turns.len());
    println!("  Route points: {}", track.route_point_count());

    if track.has_position_data() {
        println!("\nExporting overlays...");
        export_route_kml(&track, input_path, &export_opts)?;
        export_hazards_kml(&track, input_path, &export_opts)?;
        println!("✓ KML export complete");
    } else {
        println!("\n⊘ No position data in this log");
        println!("Note: the log may not contain any $GPGGA/$GPRMC sentences.");
        println!("Check that the receiver had a fix while logging.");
    }

    Ok(())
}
