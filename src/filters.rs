//! Fix-quality and export filtering heuristics
//!
//! This module filters out fixes too weak to draw and identifies tracks not
//! worth exporting at all, such as a receiver warming up on a desk or a log
//! that never acquired a usable constellation.
//!
//! # Usage
//!
//! The weak-fix filter runs ahead of route building; hazard classification
//! sees the unfiltered sequence. The export skip heuristic is controlled by
//! the CLI's force flag, while library consumers call it directly.

use crate::types::{Fix, TrackLog};

/// Minimum satellites in view for a fix to count toward the route
pub const MIN_ROUTE_SATELLITES: i32 = 2;
/// Minimum speed in mph for a fix to count toward the route
pub const MIN_ROUTE_SPEED: f64 = 1.0;

/// Drop fixes too weak to contribute to the route polyline
///
/// A fix is kept when it tracks at least [`MIN_ROUTE_SATELLITES`] and moves
/// at least [`MIN_ROUTE_SPEED`]. A fix with an unknown satellite count is
/// given the benefit of the doubt on that check.
pub fn filter_weak_fixes(fixes: &[Fix]) -> Vec<Fix> {
    fixes
        .iter()
        .filter(|fix| {
            fix.satellites.map_or(true, |n| n >= MIN_ROUTE_SATELLITES)
                && fix.speed >= MIN_ROUTE_SPEED
        })
        .cloned()
        .collect()
}

/// Determines if a track should be skipped for export
///
/// A track with no fused fixes, or with neither route segments nor hazard
/// points, produces empty overlays that only clutter the output directory.
///
/// # Arguments
/// * `track` - The processed track to evaluate
/// * `force_export` - If true, never skips (overrides all heuristics)
///
/// # Returns
/// Tuple of (should_skip, reason_description)
pub fn should_skip_export(track: &TrackLog, force_export: bool) -> (bool, String) {
    if force_export {
        return (false, String::new()); // Never skip when forced
    }

    if track.fixes.is_empty() {
        return (true, "no usable fixes after fusion".to_string());
    }

    if track.route.is_empty() && track.hazards.is_empty() {
        return (
            true,
            "no route segments or hazard points detected".to_string(),
        );
    }

    (false, String::new())
}
