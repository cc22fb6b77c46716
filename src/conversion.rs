//! Unit conversion utilities for NMEA GPS data
//!
//! NMEA sentences pack coordinates as degrees-and-minutes, timestamps as
//! HHMMSS.ss clock readings, and speed over ground in knots. These pure
//! functions normalize all three into the units the rest of the pipeline
//! works in: decimal degrees, seconds since midnight, miles per hour.

/// Statute miles per hour in one knot
pub const KNOTS_TO_MPH: f64 = 1.1508;

/// Convert a packed DDMM.MMMM coordinate to signed decimal degrees
///
/// The hemisphere sign is expected to already be applied to the packed
/// value. Everything above the hundreds place is whole degrees, the rest is
/// minutes: `4530.0` becomes `45.5`, and `-4530.0` becomes `-45.5`.
pub fn packed_to_decimal_degrees(packed: f64) -> f64 {
    let sign = if packed < 0.0 { -1.0 } else { 1.0 };
    let magnitude = packed.abs();
    let degrees = (magnitude / 100.0).floor();
    let minutes = magnitude % 100.0;
    sign * (degrees + minutes / 60.0)
}

/// Convert a packed HHMMSS.ss UTC clock reading to seconds since midnight
///
/// Fractional seconds survive the conversion: `123456.5` becomes `45296.5`.
pub fn utc_to_seconds(packed: f64) -> f64 {
    let hours = (packed / 10_000.0).floor();
    let remainder = packed % 10_000.0;
    let minutes = (remainder / 100.0).floor();
    let seconds = remainder % 100.0;
    hours * 3600.0 + minutes * 60.0 + seconds
}

/// Convert speed over ground from knots to miles per hour
pub fn knots_to_mph(knots: f64) -> f64 {
    knots * KNOTS_TO_MPH
}
