#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bare (longitude, latitude) pair in decimal degrees
///
/// Field order follows the KML coordinate convention: longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// One normalized, timestamped sample of the fused position series
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    /// Seconds since midnight UTC, strictly ascending within a track
    pub time: f64,
    /// Latitude in decimal degrees, negative in the southern hemisphere
    pub latitude: f64,
    /// Longitude in decimal degrees, negative in the western hemisphere
    pub longitude: f64,
    /// Ground speed in mph
    pub speed: f64,
    /// Heading in degrees, due north = 0
    pub heading: f64,
    /// Satellites in view, when the source stream reported them
    pub satellites: Option<i32>,
    /// Smallest signed heading change from the previous fix, in degrees.
    /// Filled by the motion pass; boundary fixes copy their neighbor.
    pub heading_delta: f64,
    /// Centered rolling mean of `speed`, present only where a full
    /// window fits
    pub speed_avg: Option<f64>,
}

impl Fix {
    /// The position of this fix as a bare point
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }

    /// Check that both coordinates are finite numbers
    pub fn has_position(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Hazard categories flagged along a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HazardKind {
    Stop,
    LeftTurn,
    RightTurn,
}

impl HazardKind {
    /// Human-readable label used in overlay descriptions
    pub fn label(&self) -> &'static str {
        match self {
            HazardKind::Stop => "Stop",
            HazardKind::LeftTurn => "Left Turn",
            HazardKind::RightTurn => "Right Turn",
        }
    }
}

/// Classified hazard points of one track, per category, in track order
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HazardSet {
    pub stops: Vec<GeoPoint>,
    pub left_turns: Vec<GeoPoint>,
    pub right_turns: Vec<GeoPoint>,
}

impl HazardSet {
    /// Total hazard count across all categories
    pub fn len(&self) -> usize {
        self.stops.len() + self.left_turns.len() + self.right_turns.len()
    }

    /// Check whether no category holds any points
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty() && self.left_turns.is_empty() && self.right_turns.is_empty()
    }

    /// Iterate the categories with their point lists, stops first
    pub fn iter(&self) -> impl Iterator<Item = (HazardKind, &[GeoPoint])> {
        [
            (HazardKind::Stop, self.stops.as_slice()),
            (HazardKind::LeftTurn, self.left_turns.as_slice()),
            (HazardKind::RightTurn, self.right_turns.as_slice()),
        ]
        .into_iter()
    }
}
