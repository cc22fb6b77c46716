//! Threshold classification of stop and turn hazard candidates

use crate::types::{Fix, HazardSet};

/// Band and radius settings for hazard classification
///
/// All bands are exclusive on both ends. The defaults were tuned on real
/// vehicle logs; a 10 m stop radius is the other deployed variant.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Stop speed band in mph, applied to both the instantaneous speed
    /// and the rolling average
    pub stop_band: (f64, f64),
    /// Turn band on the heading delta magnitude, in degrees
    pub turn_delta_band: (f64, f64),
    /// Speed band in mph inside which a heading change counts as a turn
    pub turn_speed_band: (f64, f64),
    /// Suppression radius for clustered stop candidates, in meters
    pub stop_radius_m: f64,
    /// Suppression radius for clustered turn candidates, in meters
    pub turn_radius_m: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            stop_band: (9.0, 12.0),
            turn_delta_band: (5.0, 8.0),
            turn_speed_band: (3.0, 25.0),
            stop_radius_m: 15.0,
            turn_radius_m: 8.0,
        }
    }
}

fn within(value: f64, band: (f64, f64)) -> bool {
    band.0 < value && value < band.1
}

/// Collect the raw stop and turn candidates along the fix sequence
///
/// Each category's rule is checked independently per fix, and candidates
/// keep track order. A fix braking through the stop band counts as a stop
/// only when its rolling average agrees; a fix without a rolling average
/// never does. Turns read the sign of the heading delta: negative is a
/// left turn, positive a right turn.
pub fn classify_candidates(fixes: &[Fix], thresholds: &Thresholds) -> HazardSet {
    let mut candidates = HazardSet::default();

    for fix in fixes {
        if within(fix.speed, thresholds.stop_band)
            && fix
                .speed_avg
                .is_some_and(|avg| within(avg, thresholds.stop_band))
        {
            candidates.stops.push(fix.point());
        }
        if within(-fix.heading_delta, thresholds.turn_delta_band)
            && within(fix.speed, thresholds.turn_speed_band)
        {
            candidates.left_turns.push(fix.point());
        }
        if within(fix.heading_delta, thresholds.turn_delta_band)
            && within(fix.speed, thresholds.turn_speed_band)
        {
            candidates.right_turns.push(fix.point());
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(speed: f64, speed_avg: Option<f64>, heading_delta: f64) -> Fix {
        Fix {
            time: 0.0,
            latitude: 43.0,
            longitude: -77.0,
            speed,
            heading: 0.0,
            satellites: Some(8),
            heading_delta,
            speed_avg,
        }
    }

    #[test]
    fn test_stop_needs_both_speed_and_average_in_band() {
        let thresholds = Thresholds::default();

        let fixes = vec![fix(10.5, Some(10.0), 0.0)];
        assert_eq!(classify_candidates(&fixes, &thresholds).stops.len(), 1);

        // Instantaneous speed in band, average outside
        let fixes = vec![fix(10.5, Some(14.0), 0.0)];
        assert!(classify_candidates(&fixes, &thresholds).stops.is_empty());

        // Average in band, instantaneous outside
        let fixes = vec![fix(14.0, Some(10.0), 0.0)];
        assert!(classify_candidates(&fixes, &thresholds).stops.is_empty());

        // No average computed, never a stop
        let fixes = vec![fix(10.5, None, 0.0)];
        assert!(classify_candidates(&fixes, &thresholds).stops.is_empty());
    }

    #[test]
    fn test_stop_band_bounds_are_exclusive() {
        let thresholds = Thresholds::default();
        for boundary in [9.0, 12.0] {
            let fixes = vec![fix(boundary, Some(boundary), 0.0)];
            assert!(
                classify_candidates(&fixes, &thresholds).stops.is_empty(),
                "boundary speed {boundary} must not classify"
            );
        }
    }

    #[test]
    fn test_turn_sign_selects_category() {
        let thresholds = Thresholds::default();

        let fixes = vec![fix(15.0, None, -6.0)];
        let set = classify_candidates(&fixes, &thresholds);
        assert_eq!(set.left_turns.len(), 1);
        assert!(set.right_turns.is_empty());

        let fixes = vec![fix(15.0, None, 6.0)];
        let set = classify_candidates(&fixes, &thresholds);
        assert_eq!(set.right_turns.len(), 1);
        assert!(set.left_turns.is_empty());
    }

    #[test]
    fn test_turn_requires_plausible_speed() {
        let thresholds = Thresholds::default();

        // Walking-pace heading jitter
        let fixes = vec![fix(2.0, None, 6.0)];
        assert!(classify_candidates(&fixes, &thresholds).is_empty());

        // Highway lane drift
        let fixes = vec![fix(30.0, None, 6.0)];
        assert!(classify_candidates(&fixes, &thresholds).is_empty());

        // Boundary speeds are excluded
        for boundary in [3.0, 25.0] {
            let fixes = vec![fix(boundary, None, 6.0)];
            assert!(classify_candidates(&fixes, &thresholds).is_empty());
        }
    }

    #[test]
    fn test_turn_delta_band_bounds_are_exclusive() {
        let thresholds = Thresholds::default();
        for boundary in [5.0, 8.0, -5.0, -8.0] {
            let fixes = vec![fix(15.0, None, boundary)];
            assert!(
                classify_candidates(&fixes, &thresholds).is_empty(),
                "boundary delta {boundary} must not classify"
            );
        }
    }

    #[test]
    fn test_candidates_keep_track_order() {
        let thresholds = Thresholds::default();
        let mut first = fix(15.0, None, 6.0);
        first.latitude = 43.1;
        let mut second = fix(15.0, None, 6.5);
        second.latitude = 43.2;

        let set = classify_candidates(&[first, second], &thresholds);
        assert_eq!(set.right_turns.len(), 2);
        assert!(set.right_turns[0].latitude < set.right_turns[1].latitude);
    }

    #[test]
    fn test_one_fix_can_hit_at_most_one_turn_category() {
        let thresholds = Thresholds::default();
        let fixes = vec![fix(15.0, None, 6.0), fix(15.0, None, -6.0), fix(15.0, None, 0.0)];
        let set = classify_candidates(&fixes, &thresholds);
        assert_eq!(set.left_turns.len(), 1);
        assert_eq!(set.right_turns.len(), 1);
        assert_eq!(set.len(), 2);
    }
}
