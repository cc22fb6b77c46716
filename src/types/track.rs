use crate::types::{Fix, GeoPoint, HazardSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Line and record counters accumulated while processing one log
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackStats {
    /// Raw lines seen in the input
    pub lines: u32,
    /// Accepted `$GPGGA` sentences
    pub gga_sentences: u32,
    /// Accepted `$GPRMC` sentences
    pub rmc_sentences: u32,
    /// Accepted telemetry records
    pub telemetry_records: u32,
    /// Lines skipped as unrecognized or malformed
    pub skipped_lines: u32,
    /// Fixes surviving fusion and timestamp dedup
    pub fused_fixes: u32,
    /// Fixes dropped for repeating an already-seen timestamp
    pub duplicate_times: u32,
}

/// Complete result of processing one GPS log
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackLog {
    /// Display name of the input, usually the file name
    pub source: String,
    pub stats: TrackStats,
    /// The fused fix sequence, ascending by timestamp
    pub fixes: Vec<Fix>,
    /// Deduplicated hazard points per category
    pub hazards: HazardSet,
    /// Route polyline segments, split at coverage gaps
    pub route: Vec<Vec<GeoPoint>>,
}

impl TrackLog {
    pub fn new(source: String) -> Self {
        Self {
            source,
            stats: TrackStats::default(),
            fixes: Vec::new(),
            hazards: HazardSet::default(),
            route: Vec::new(),
        }
    }

    /// Get the covered time span of the track in seconds
    pub fn duration_seconds(&self) -> f64 {
        match (self.fixes.first(), self.fixes.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Check if this track contains any fused position data
    pub fn has_position_data(&self) -> bool {
        !self.fixes.is_empty()
    }

    /// Total points across all route segments
    pub fn route_point_count(&self) -> usize {
        self.route.iter().map(|segment| segment.len()).sum()
    }
}
