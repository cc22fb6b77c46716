//! Route polyline construction
//!
//! The fused fix sequence is thinned into a drawable trajectory. Samples
//! repeating the previous position and runs of straight driving collapse,
//! and an implausibly long jump between consecutive fixes (a tunnel, a
//! parking garage, a power cycle) starts a new segment instead of drawing
//! a line across the gap.

use crate::motion::distance_m;
use crate::types::{Fix, GeoPoint};

/// Settings for route thinning and gap segmentation
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// Headings within this many degrees of the run's anchor heading
    /// still count as going straight
    pub straight_tolerance_deg: f64,
    /// At or below this speed in mph a fix never counts as part of a
    /// straight run
    pub min_moving_speed: f64,
    /// Jumps between these bounds in meters split the route into a new
    /// segment
    pub gap_split_m: (f64, f64),
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            straight_tolerance_deg: 9.0,
            min_moving_speed: 1.25,
            gap_split_m: (350.0, 100_000.0),
        }
    }
}

/// Thin the fix sequence into polyline segments
///
/// A straight run is anchored at the heading of the fix that broke the
/// previous run; fixes staying within the tolerance of that anchor while
/// moving are dropped. The comparison is a plain difference, so a run
/// crossing due north simply re-anchors. Points repeating the previous
/// position exactly are dropped, and the fix that triggers a gap split is
/// consumed by the split itself. Empty segments are never emitted.
pub fn build_route(fixes: &[Fix], options: &RouteOptions) -> Vec<Vec<GeoPoint>> {
    let mut segments: Vec<Vec<GeoPoint>> = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();
    let mut anchor_heading = 0.0_f64;
    // The first gap measures from the origin, far outside the split band
    let mut previous = GeoPoint {
        longitude: 0.0,
        latitude: 0.0,
    };

    for fix in fixes {
        let going_straight = (fix.heading - anchor_heading).abs()
            < options.straight_tolerance_deg
            && fix.speed > options.min_moving_speed;
        if !going_straight {
            anchor_heading = fix.heading;
        }

        let gap = distance_m(previous, fix.point());
        if options.gap_split_m.0 < gap && gap < options.gap_split_m.1 && !going_straight {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else if gap != 0.0 && !going_straight {
            current.push(fix.point());
        }

        previous = fix.point();
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
