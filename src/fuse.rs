//! Stream fusion: one time-ordered fix sequence from parallel sentence streams
//!
//! RMC sentences carry position, speed and heading; GGA sentences carry an
//! independent position fix and the satellite count. A linear two-pointer
//! merge walks both collections in timestamp order and emits one fix per
//! RMC timestamp, borrowing the satellite count from the GGA side. A GGA
//! timestamp with no RMC partner contributes no fix of its own, since no
//! speed or heading was measured there.

use crate::conversion::{knots_to_mph, packed_to_decimal_degrees, utc_to_seconds};
use crate::types::{Fix, GgaFix, RmcFix, SentenceStreams, TelemetryFix, TrackStats};

/// Merge the sentence streams into one deduplicated, ascending fix sequence
///
/// Both NMEA streams must already be in non-decreasing timestamp order,
/// which the parser guarantees by preserving file order. When a log holds
/// no NMEA fixes at all, the telemetry records (if any) become the
/// sequence instead.
pub fn fuse_streams(streams: &SentenceStreams, stats: &mut TrackStats) -> Vec<Fix> {
    let mut fixes = merge_nmea(&streams.gga, &streams.rmc);
    if fixes.is_empty() {
        fixes = telemetry_fixes(&streams.telemetry);
    }

    fixes.retain(Fix::has_position);
    dedup_by_time(&mut fixes, stats);
    stats.fused_fixes = fixes.len() as u32;
    fixes
}

/// Two-pointer merge over the GGA and RMC collections
///
/// The walk stops as soon as either stream runs out: a fix without a
/// satellite reading or without motion data is not worth emitting.
fn merge_nmea(gga: &[GgaFix], rmc: &[RmcFix]) -> Vec<Fix> {
    let mut fixes = Vec::new();
    let mut r = 0;
    let mut g = 0;

    while r < rmc.len() && g < gga.len() {
        let time_rmc = utc_to_seconds(rmc[r].utc);
        let time_gga = utc_to_seconds(gga[g].utc);

        if time_rmc == time_gga {
            let mut fix = fix_from_rmc(&rmc[r], time_rmc, gga[g].satellites);
            // Position comes from the RMC side; GGA only fills a hole
            if !(rmc[r].latitude.is_finite() && rmc[r].longitude.is_finite()) {
                fix.latitude = packed_to_decimal_degrees(gga[g].latitude);
                fix.longitude = packed_to_decimal_degrees(gga[g].longitude);
            }
            fixes.push(fix);
            r += 1;
            g += 1;
        } else if time_rmc < time_gga {
            // Unpartnered RMC: the satellite count is read from wherever
            // the GGA pointer currently sits, not interpolated
            fixes.push(fix_from_rmc(&rmc[r], time_rmc, gga[g].satellites));
            r += 1;
        } else {
            // GGA-only timestamp, nothing to emit
            g += 1;
        }
    }

    fixes
}

fn fix_from_rmc(rmc: &RmcFix, time: f64, satellites: i32) -> Fix {
    Fix {
        time,
        latitude: packed_to_decimal_degrees(rmc.latitude),
        longitude: packed_to_decimal_degrees(rmc.longitude),
        speed: knots_to_mph(rmc.speed_knots),
        heading: rmc.track_deg,
        satellites: Some(satellites),
        heading_delta: 0.0,
        speed_avg: None,
    }
}

/// Telemetry records carry no clock, so they are stamped by record order
/// at the logger's 1 Hz cadence
fn telemetry_fixes(records: &[TelemetryFix]) -> Vec<Fix> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| Fix {
            time: index as f64,
            latitude: record.latitude,
            longitude: record.longitude,
            speed: record.speed.unwrap_or(0.0),
            heading: record.angle.unwrap_or(0.0),
            satellites: record.satellites,
            heading_delta: 0.0,
            speed_avg: None,
        })
        .collect()
}

/// Drop fixes repeating or regressing an already-kept timestamp, first wins
fn dedup_by_time(fixes: &mut Vec<Fix>, stats: &mut TrackStats) {
    let before = fixes.len();
    let mut last_kept = f64::NEG_INFINITY;
    fixes.retain(|fix| {
        if fix.time <= last_kept {
            false
        } else {
            last_kept = fix.time;
            true
        }
    });
    stats.duplicate_times = (before - fixes.len()) as u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rmc(utc: f64, lat: f64, lon: f64, knots: f64, track: f64) -> RmcFix {
        RmcFix {
            utc,
            status: "A".to_string(),
            latitude: lat,
            longitude: lon,
            speed_knots: knots,
            track_deg: track,
            date: "130917".to_string(),
            variation: None,
            checksum: None,
        }
    }

    fn gga(utc: f64, lat: f64, lon: f64, satellites: i32) -> GgaFix {
        GgaFix {
            utc,
            latitude: lat,
            longitude: lon,
            fix_quality: 1,
            satellites,
            hdop: 1.0,
            altitude_m: None,
            geoid_separation_m: None,
            dgps_age: None,
            dgps_station: None,
        }
    }

    #[test]
    fn test_matching_timestamps_produce_one_fix() {
        let streams = SentenceStreams {
            gga: vec![gga(81836.0, 4311.12, -7740.50, 7)],
            rmc: vec![rmc(81836.0, 4311.12, -7740.50, 10.0, 270.0)],
            telemetry: Vec::new(),
        };
        let mut stats = TrackStats::default();
        let fixes = fuse_streams(&streams, &mut stats);

        assert_eq!(fixes.len(), 1);
        let fix = &fixes[0];
        assert_eq!(fix.time, utc_to_seconds(81836.0));
        assert!((fix.latitude - 43.1853333).abs() < 1e-6);
        assert!((fix.longitude - (-77.675)).abs() < 1e-6);
        assert!((fix.speed - 11.508).abs() < 1e-9);
        assert_eq!(fix.heading, 270.0);
        assert_eq!(fix.satellites, Some(7));
        assert_eq!(stats.fused_fixes, 1);
    }

    #[test]
    fn test_unpartnered_rmc_borrows_current_gga_satellites() {
        // RMC at :36 and :37, GGA only at :36 and :39. Both RMC fixes are
        // emitted; the second borrows the satellite count the GGA pointer
        // sits on, which by then is the :39 sentence.
        let streams = SentenceStreams {
            gga: vec![gga(81836.0, 4311.12, -7740.50, 7), gga(81839.0, 4311.20, -7740.60, 9)],
            rmc: vec![
                rmc(81836.0, 4311.12, -7740.50, 10.0, 270.0),
                rmc(81837.0, 4311.14, -7740.52, 10.0, 270.0),
            ],
            telemetry: Vec::new(),
        };
        let mut stats = TrackStats::default();
        let fixes = fuse_streams(&streams, &mut stats);

        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].satellites, Some(7));
        assert_eq!(fixes[1].satellites, Some(9));
    }

    #[test]
    fn test_gga_only_timestamps_are_dropped() {
        let streams = SentenceStreams {
            gga: vec![
                gga(81835.0, 4311.10, -7740.48, 6),
                gga(81836.0, 4311.12, -7740.50, 7),
            ],
            rmc: vec![rmc(81836.0, 4311.12, -7740.50, 10.0, 270.0)],
            telemetry: Vec::new(),
        };
        let mut stats = TrackStats::default();
        let fixes = fuse_streams(&streams, &mut stats);

        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].time, utc_to_seconds(81836.0));
    }

    #[test]
    fn test_merge_stops_when_either_stream_runs_out() {
        // Two trailing RMC sentences have no GGA coverage left
        let streams = SentenceStreams {
            gga: vec![gga(81836.0, 4311.12, -7740.50, 7)],
            rmc: vec![
                rmc(81836.0, 4311.12, -7740.50, 10.0, 270.0),
                rmc(81837.0, 4311.14, -7740.52, 10.0, 270.0),
                rmc(81838.0, 4311.16, -7740.54, 10.0, 270.0),
            ],
            telemetry: Vec::new(),
        };
        let mut stats = TrackStats::default();
        let fixes = fuse_streams(&streams, &mut stats);
        assert_eq!(fixes.len(), 1);
    }

    #[test]
    fn test_output_is_sorted_and_duplicate_free() {
        let mut streams = SentenceStreams::default();
        for i in 0..5 {
            let utc = 81830.0 + i as f64;
            streams.gga.push(gga(utc, 4311.12, -7740.50, 7));
            streams.rmc.push(rmc(utc, 4311.12, -7740.50, 10.0, 270.0));
        }
        // A stuck receiver repeating the :32 second on both streams
        streams.gga.insert(3, gga(81832.0, 4311.12, -7740.50, 7));
        streams.rmc.insert(3, rmc(81832.0, 4311.12, -7740.50, 10.0, 270.0));

        let mut stats = TrackStats::default();
        let fixes = fuse_streams(&streams, &mut stats);

        for pair in fixes.windows(2) {
            assert!(pair[0].time < pair[1].time);
        }
        assert_eq!(stats.duplicate_times, 1);
        assert_eq!(fixes.len(), 5);
    }

    #[test]
    fn test_empty_streams_fuse_to_empty() {
        let mut stats = TrackStats::default();
        assert!(fuse_streams(&SentenceStreams::default(), &mut stats).is_empty());
        assert_eq!(stats.fused_fixes, 0);

        // One empty side also yields nothing
        let streams = SentenceStreams {
            gga: vec![gga(81836.0, 4311.12, -7740.50, 7)],
            rmc: Vec::new(),
            telemetry: Vec::new(),
        };
        let mut stats = TrackStats::default();
        assert!(fuse_streams(&streams, &mut stats).is_empty());
    }

    #[test]
    fn test_telemetry_fallback_is_stamped_by_record_order() {
        let streams = SentenceStreams {
            gga: Vec::new(),
            rmc: Vec::new(),
            telemetry: vec![
                TelemetryFix {
                    latitude: 43.19,
                    longitude: -77.67,
                    altitude: Some(170.0),
                    speed: Some(12.5),
                    satellites: Some(7),
                    angle: Some(271.0),
                    fix: Some(1),
                },
                TelemetryFix {
                    latitude: 43.20,
                    longitude: -77.68,
                    altitude: None,
                    speed: None,
                    satellites: None,
                    angle: None,
                    fix: Some(1),
                },
            ],
        };
        let mut stats = TrackStats::default();
        let fixes = fuse_streams(&streams, &mut stats);

        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].time, 0.0);
        assert_eq!(fixes[1].time, 1.0);
        assert_eq!(fixes[0].speed, 12.5);
        // Missing motion fields default to zero, missing satellites stay unknown
        assert_eq!(fixes[1].speed, 0.0);
        assert_eq!(fixes[1].heading, 0.0);
        assert_eq!(fixes[1].satellites, None);
    }

    #[test]
    fn test_telemetry_ignored_when_nmea_fixes_exist() {
        let streams = SentenceStreams {
            gga: vec![gga(81836.0, 4311.12, -7740.50, 7)],
            rmc: vec![rmc(81836.0, 4311.12, -7740.50, 10.0, 270.0)],
            telemetry: vec![TelemetryFix {
                latitude: 10.0,
                longitude: 10.0,
                altitude: None,
                speed: None,
                satellites: None,
                angle: None,
                fix: Some(1),
            }],
        };
        let mut stats = TrackStats::default();
        let fixes = fuse_streams(&streams, &mut stats);
        assert_eq!(fixes.len(), 1);
        assert!((fixes[0].latitude - 43.1853333).abs() < 1e-6);
    }
}
