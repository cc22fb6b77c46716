//! NMEA Hazards Library
//!
//! A Rust library for parsing NMEA-0183 GPS driving logs and mapping the
//! stops and turns along them. The parser accepts `$GPGGA` and `$GPRMC`
//! sentences plus a `key=value` telemetry format, fuses the streams into
//! one time-ordered track, derives per-fix motion signals, classifies stop
//! and turn hazard points, and exports KML overlays for map viewers.
//!
//! # Features
//!
//! - **`csv`** (default): Enable track table export as CSV
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable hazard export in JSON format
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a log file and inspect the hazards found along it:
//! ```rust,no_run
//! use nmea_hazards::{parse_gps_file, AnalysisOptions};
//! use std::path::Path;
//!
//! let options = AnalysisOptions::default();
//! let track = parse_gps_file(Path::new("drive_1.txt"), &options, false).unwrap();
//! println!("Fused {} fixes over {:.0} s", track.fixes.len(), track.duration_seconds());
//! println!(
//!     "{} stops, {} left turns, {} right turns",
//!     track.hazards.stops.len(),
//!     track.hazards.left_turns.len(),
//!     track.hazards.right_turns.len()
//! );
//! ```
//!
//! Export the overlays:
//! ```rust,no_run
//! use nmea_hazards::{parse_gps_file, AnalysisOptions, ExportOptions};
//! use nmea_hazards::export::{export_hazards_kml, export_route_kml};
//! use std::path::Path;
//!
//! let input = Path::new("drive_1.txt");
//! let track = parse_gps_file(input, &AnalysisOptions::default(), false).unwrap();
//! let export_options = ExportOptions {
//!     route_kml: true,
//!     hazards_kml: true,
//!     ..ExportOptions::default()
//! };
//! export_route_kml(&track, input, &export_options).unwrap();
//! export_hazards_kml(&track, input, &export_options).unwrap();
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_gps_file`] - Parse a log file and run the full pipeline
//! - [`parse_gps_str`] - Parse log text already held in memory
//! - [`parse_line`] - Low-level single-line sentence parsing
//!
//! ## Data Types
//! - [`TrackLog`] - Complete processed track with fixes, hazards and route
//! - [`Fix`] - One normalized sample of the fused position series
//! - [`HazardSet`] - Classified hazard points per category
//! - [`AnalysisOptions`] - Thresholds and route settings for the pipeline
//! - [`ExportOptions`] - Configuration for export operations
//!
//! ## Pipeline Stages
//! - [`fuse_streams`] - Two-pointer merge of the sentence streams
//! - [`apply_heading_deltas`] / [`apply_rolling_speed`] - Motion signals
//! - [`classify_candidates`] - Threshold classification per category
//! - [`dedup_hazards`] - Spatial suppression of clustered candidates
//! - [`build_route`] - Thinned route polyline with gap segmentation
//!
//! ## Export Functions
//! - [`export_route_kml`] / [`export_hazards_kml`] - KML overlay documents
//! - [`KmlDocument`] - Accumulator for merged multi-track documents
//! - [`compute_export_paths`] - Helper for consistent path computation
//!
//! ## Filtering Functions
//! - [`filter_weak_fixes`] - Drop fixes too weak to draw
//! - [`should_skip_export`] - Determine if a track is worth exporting

// Module declarations
pub mod classify;
pub mod conversion;
pub mod dedup;
pub mod error;
pub mod export;
pub mod filters;
pub mod fuse;
pub mod motion;
pub mod parser;
pub mod route;
pub mod types;

// Re-export everything from modules for convenience
// This keeps call sites short while the module layout stays flexible
#[allow(ambiguous_glob_reexports)]
pub use classify::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use dedup::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use fuse::*;
#[allow(ambiguous_glob_reexports)]
pub use motion::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use route::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
