//! Spatial suppression of clustered hazard candidates
//!
//! A vehicle braking to a stop emits several seconds of candidate fixes a
//! few meters apart. Only the earliest of each cluster is worth plotting;
//! the rest are suppressed by pairwise distance against the original
//! candidate list.

use crate::classify::Thresholds;
use crate::motion::distance_m;
use crate::types::{GeoPoint, HazardSet};
use std::collections::HashSet;

/// Collapse candidates lying within `radius_m` of an earlier candidate
///
/// Every ordered pair of original indices is compared, so a point already
/// marked for removal still suppresses points after it. Survivors keep
/// their original order. The pass is quadratic in the candidate count,
/// which stays in the low hundreds per log, and running it twice changes
/// nothing.
pub fn suppress_within(points: &[GeoPoint], radius_m: f64) -> Vec<GeoPoint> {
    let mut removed = HashSet::new();

    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if distance_m(points[i], points[j]) < radius_m {
                removed.insert(j);
            }
        }
    }

    points
        .iter()
        .enumerate()
        .filter(|(index, _)| !removed.contains(index))
        .map(|(_, point)| *point)
        .collect()
}

/// Apply the per-category suppression radii to a full candidate set
pub fn dedup_hazards(candidates: HazardSet, thresholds: &Thresholds) -> HazardSet {
    HazardSet {
        stops: suppress_within(&candidates.stops, thresholds.stop_radius_m),
        left_turns: suppress_within(&candidates.left_turns, thresholds.turn_radius_m),
        right_turns: suppress_within(&candidates.right_turns, thresholds.turn_radius_m),
    }
}
