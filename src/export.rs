//! Export functionality for processed tracks
//!
//! Contains the serializers for processed GPS tracks: KML overlay documents
//! for the hazard points and the route polyline, the fused fix table as
//! CSV, and the hazard set as JSON. The KML side writes literal markup line
//! by line; the documents are small and flat, and the fixed style strings
//! match the map viewers the overlays were tuned on.

use crate::error::Result;
use crate::types::{GeoPoint, HazardKind, HazardSet, TrackLog};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

// KML colors are aabbggrr hex
const STOP_COLOR: &str = "ff780078";
const LEFT_TURN_COLOR: &str = "FF14F0FF";
const RIGHT_TURN_COLOR: &str = "ffffff00";
const ROUTE_COLOR: &str = "ffffff00";
const ROUTE_WIDTH: u32 = 8;
const HAZARD_ICON: &str = "http://maps.google.com/mapfiles/kml/paddle/1.png";

/// Export options for controlling output formats
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Write the route overlay document
    pub route_kml: bool,
    /// Write the hazard overlay document
    pub hazards_kml: bool,
    /// Write the fused fix table as CSV
    pub track_csv: bool,
    /// Write the hazard set as JSON
    pub hazards_json: bool,
    /// Destination directory, defaulting to the input's parent
    pub output_dir: Option<String>,
    /// Export even when the skip heuristics would drop the track
    pub force_export: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            route_kml: false,
            hazards_kml: false,
            track_csv: false,
            hazards_json: false,
            output_dir: None,
            force_export: false,
        }
    }
}

/// Compute the output paths for one input file
///
/// Returns the route KML, hazards KML, track CSV and hazards JSON paths in
/// that order. The destination directory comes from the options, falling
/// back to the directory the input lives in.
pub fn compute_export_paths(
    input_path: &Path,
    export_options: &ExportOptions,
) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
    let base_name = input_path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let output_dir = export_options
        .output_dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| input_path.parent().unwrap_or(Path::new(".")).to_path_buf());

    (
        output_dir.join(format!("{base_name}.route.kml")),
        output_dir.join(format!("{base_name}.hazards.kml")),
        output_dir.join(format!("{base_name}.track.csv")),
        output_dir.join(format!("{base_name}.hazards.json")),
    )
}

/// A KML document under construction
///
/// Placemarks accumulate in insertion order, so several tracks can be
/// folded into one document before writing. That is how the merged hazard
/// map across a whole batch of logs is produced.
#[derive(Debug, Default)]
pub struct KmlDocument {
    placemarks: Vec<String>,
}

impl KmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.placemarks.is_empty()
    }

    pub fn placemark_count(&self) -> usize {
        self.placemarks.len()
    }

    /// Add one point placemark per hazard, styled by category
    pub fn add_hazards(&mut self, hazards: &HazardSet) {
        for (kind, points) in hazards.iter() {
            for point in points {
                self.placemarks.push(hazard_placemark(kind, *point));
            }
        }
    }

    /// Add one line placemark per route segment
    pub fn add_route(&mut self, route: &[Vec<GeoPoint>]) {
        for segment in route {
            if !segment.is_empty() {
                self.placemarks.push(route_placemark(segment));
            }
        }
    }

    /// Write the document, creating parent directories as needed
    pub fn write_to(&self, output_path: &Path) -> Result<()> {
        ensure_parent_dir(output_path)?;

        let mut file = File::create(output_path)?;
        writeln!(file, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(file, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
        writeln!(file, "<Document>")?;
        for placemark in &self.placemarks {
            file.write_all(placemark.as_bytes())?;
        }
        writeln!(file, "</Document>")?;
        writeln!(file, "</kml>")?;
        Ok(())
    }
}

fn kind_color(kind: HazardKind) -> &'static str {
    match kind {
        HazardKind::Stop => STOP_COLOR,
        HazardKind::LeftTurn => LEFT_TURN_COLOR,
        HazardKind::RightTurn => RIGHT_TURN_COLOR,
    }
}

fn hazard_placemark(kind: HazardKind, point: GeoPoint) -> String {
    format!(
        "<Placemark>\n\
         <description>{}</description>\n\
         <Style><IconStyle><color>{}</color><Icon><href>{}</href></Icon></IconStyle></Style>\n\
         <Point><coordinates>{},{},0.0</coordinates></Point>\n\
         </Placemark>\n",
        kind.label(),
        kind_color(kind),
        HAZARD_ICON,
        point.longitude,
        point.latitude
    )
}

fn route_placemark(segment: &[GeoPoint]) -> String {
    let mut coordinates = String::new();
    for point in segment {
        coordinates.push_str(&format!("{},{},0.0\n", point.longitude, point.latitude));
    }
    format!(
        "<Placemark>\n\
         <name>Route</name>\n\
         <description>Route Taken</description>\n\
         <Style><LineStyle><color>{}</color><width>{}</width></LineStyle></Style>\n\
         <LineString><coordinates>\n{}</coordinates></LineString>\n\
         </Placemark>\n",
        ROUTE_COLOR, ROUTE_WIDTH, coordinates
    )
}

fn ensure_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Export the route overlay for one track
///
/// A track without route segments produces no file and is not an error.
pub fn export_route_kml(
    track: &TrackLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<()> {
    if track.route.is_empty() {
        return Ok(());
    }

    let (route_path, _, _, _) = compute_export_paths(input_path, export_options);
    let mut document = KmlDocument::new();
    document.add_route(&track.route);
    document.write_to(&route_path)?;

    println!("Exported route to: {}", route_path.display());
    Ok(())
}

/// Export the hazard overlay for one track
///
/// A track without hazard points produces no file and is not an error.
pub fn export_hazards_kml(
    track: &TrackLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<()> {
    if track.hazards.is_empty() {
        return Ok(());
    }

    let (_, hazards_path, _, _) = compute_export_paths(input_path, export_options);
    let mut document = KmlDocument::new();
    document.add_hazards(&track.hazards);
    document.write_to(&hazards_path)?;

    println!("Exported hazards to: {}", hazards_path.display());
    Ok(())
}

/// Export the fused fix table as CSV
#[cfg(feature = "csv")]
pub fn export_track_csv(
    track: &TrackLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<()> {
    if track.fixes.is_empty() {
        return Ok(());
    }

    let (_, _, csv_path, _) = compute_export_paths(input_path, export_options);
    ensure_parent_dir(&csv_path)?;

    let mut writer = csv::Writer::from_path(&csv_path)?;

    writer.write_record([
        "time (s)",
        "latitude",
        "longitude",
        "speed (mph)",
        "heading (deg)",
        "heading delta (deg)",
        "speed avg (mph)",
        "satellites",
    ])?;

    for fix in &track.fixes {
        writer.write_record([
            format!("{:.2}", fix.time),
            format!("{:.7}", fix.latitude),
            format!("{:.7}", fix.longitude),
            format!("{:.3}", fix.speed),
            format!("{:.1}", fix.heading),
            format!("{:.2}", fix.heading_delta),
            fix.speed_avg
                .map(|avg| format!("{:.3}", avg))
                .unwrap_or_default(),
            fix.satellites.map(|n| n.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;

    println!("Exported track table to: {}", csv_path.display());
    Ok(())
}

/// Export the hazard set as JSON
#[cfg(feature = "json")]
pub fn export_hazards_json(
    track: &TrackLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<()> {
    if track.hazards.is_empty() {
        return Ok(());
    }

    let (_, _, _, json_path) = compute_export_paths(input_path, export_options);
    ensure_parent_dir(&json_path)?;

    let file = File::create(&json_path)?;
    serde_json::to_writer_pretty(file, &track.hazards)?;

    println!("Exported hazards to: {}", json_path.display());
    Ok(())
}
