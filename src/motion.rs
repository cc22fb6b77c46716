//! Derived motion signals over the fused fix sequence
//!
//! Headings live on a circle, so the change between two of them is the
//! smallest signed angle from one to the other, never the raw difference.
//! Speed additionally gets a centered rolling average so that a single
//! noisy sample cannot masquerade as a stop or a burst of motion.

use crate::types::{Fix, GeoPoint};
use geo::{Distance, Geodesic, Point};

/// Window width of the centered rolling speed average, in samples
pub const SPEED_AVG_WINDOW: usize = 10;

/// Smallest signed change between two headings, in degrees
///
/// The result lies in (-180, 180]: positive for a clockwise (rightward)
/// change, negative for counter-clockwise. Crossing due north stays small,
/// so 359 to 1 is +2 rather than -358, and 1 to 359 is -2.
pub fn heading_delta(previous: f64, current: f64) -> f64 {
    let raw = current - previous;
    let folded = raw.rem_euclid(360.0);
    let magnitude = if folded < 180.0 { folded } else { 360.0 - folded };
    let clockwise = (0.0..=180.0).contains(&raw) || (-360.0..=-180.0).contains(&raw);
    if clockwise {
        magnitude
    } else {
        -magnitude
    }
}

/// Fill `heading_delta` for every fix in the sequence
///
/// Interior fixes compute against their predecessor. The first fix copies
/// the second and the last copies the second-to-last, so boundary fixes
/// never hold a delta of their own. Sequences shorter than two fixes keep
/// the zero default.
pub fn apply_heading_deltas(fixes: &mut [Fix]) {
    let n = fixes.len();
    if n < 2 {
        return;
    }
    for i in 1..n {
        fixes[i].heading_delta = heading_delta(fixes[i - 1].heading, fixes[i].heading);
    }
    fixes[0].heading_delta = fixes[1].heading_delta;
    fixes[n - 1].heading_delta = fixes[n - 2].heading_delta;
}

/// Fill `speed_avg` with a centered rolling mean over `window` samples
///
/// Only positions where the full window fits get a value; the edges keep
/// `None`. With an even window the label sits right of center, so a window
/// of 10 at position `i` covers samples `i-5` through `i+4`.
pub fn apply_rolling_speed(fixes: &mut [Fix], window: usize) {
    if window == 0 || fixes.len() < window {
        return;
    }
    let lead = (window - 1) / 2;
    let lag = window - 1 - lead;
    for i in lag..(fixes.len() - lead) {
        let sum: f64 = fixes[i - lag..=i + lead].iter().map(|fix| fix.speed).sum();
        fixes[i].speed_avg = Some(sum / window as f64);
    }
}

/// Geodesic distance between two points in meters
///
/// Coincident points measure exactly zero.
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    Geodesic.distance(
        Point::new(a.longitude, a.latitude),
        Point::new(b.longitude, b.latitude),
    )
}
