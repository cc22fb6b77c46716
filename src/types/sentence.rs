#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sentence kinds recognized by the line parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    Gga,
    Rmc,
    Telemetry,
}

/// One accepted `$GPGGA` sentence
///
/// Coordinates stay in the packed DDMM.MMMM form with the hemisphere sign
/// already applied; the clock reading stays in packed HHMMSS.ss form.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GgaFix {
    /// Packed HHMMSS.ss UTC clock reading
    pub utc: f64,
    /// Packed DDMM.MMMM latitude, negative in the southern hemisphere
    pub latitude: f64,
    /// Packed DDDMM.MMMM longitude, negative in the western hemisphere
    pub longitude: f64,
    /// Fix quality indicator, 0 = no fix
    pub fix_quality: i32,
    /// Number of satellites being tracked
    pub satellites: i32,
    /// Horizontal dilution of precision
    pub hdop: f64,
    /// Antenna altitude in meters, when the sentence carries it
    pub altitude_m: Option<f64>,
    /// Geoidal separation in meters, when the sentence carries it
    pub geoid_separation_m: Option<f64>,
    /// Age of differential GPS data, absent on short sentences
    pub dgps_age: Option<String>,
    /// Differential reference station id, absent on short sentences
    pub dgps_station: Option<String>,
}

/// One accepted `$GPRMC` sentence
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RmcFix {
    /// Packed HHMMSS.ss UTC clock reading
    pub utc: f64,
    /// Receiver status letter, "A" for an active fix
    pub status: String,
    /// Packed DDMM.MMMM latitude, negative in the southern hemisphere
    pub latitude: f64,
    /// Packed DDDMM.MMMM longitude, negative in the western hemisphere
    pub longitude: f64,
    /// Speed over ground in knots
    pub speed_knots: f64,
    /// Track made good in degrees, due north = 0
    pub track_deg: f64,
    /// UT date of the fix as DDMMYY
    pub date: String,
    /// Magnetic variation value with its direction letter, absent on
    /// short sentences
    pub variation: Option<(String, String)>,
    /// Trailing checksum field, absent on short sentences
    pub checksum: Option<String>,
}

/// One `key=value` record from the proprietary telemetry logger format
///
/// Unlike the NMEA sentences this format already carries decimal-degree
/// coordinates and mph speed, and it carries no clock: record order is the
/// only timeline.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: Option<f64>,
    /// Ground speed in mph
    pub speed: Option<f64>,
    /// Number of satellites in view
    pub satellites: Option<i32>,
    /// Heading angle in degrees, due north = 0
    pub angle: Option<f64>,
    /// Fix status flag, 0 = no fix
    pub fix: Option<i32>,
}

/// Per-kind sentence collections from one parse pass, in file order
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SentenceStreams {
    pub gga: Vec<GgaFix>,
    pub rmc: Vec<RmcFix>,
    pub telemetry: Vec<TelemetryFix>,
}

impl SentenceStreams {
    /// Check whether any NMEA positional sentences were collected
    pub fn has_nmea_data(&self) -> bool {
        !self.gga.is_empty() || !self.rmc.is_empty()
    }
}
