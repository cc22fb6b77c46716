//! Sentence-level parsing of raw GPS log lines
//!
//! Each line is classified by its leading token and split into the fields of
//! that sentence layout. Parsing fails softly: a line missing a required
//! field, or carrying garbage where a number belongs, is skipped rather than
//! aborting the file. Optional trailing fields that short sentences cut off
//! are recorded as `None`.
//!
//! Sentence layouts follow the NMEA-0183 field tables at
//! <http://aprs.gids.nl/nmea/>.

use crate::types::{GgaFix, RmcFix, SentenceKind, SentenceStreams, TelemetryFix};

/// Classify and parse one raw line, appending the record to its stream
///
/// Returns the kind of sentence accepted, or `None` when the line was
/// skipped as empty, unrecognized, or malformed.
pub fn parse_line(line: &str, streams: &mut SentenceStreams) -> Option<SentenceKind> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = line.split(',').collect();
    match tokens[0] {
        "$GPGGA" => {
            let gga = parse_gga(&tokens)?;
            streams.gga.push(gga);
            Some(SentenceKind::Gga)
        }
        "$GPRMC" => {
            let rmc = parse_rmc(&tokens)?;
            streams.rmc.push(rmc);
            Some(SentenceKind::Rmc)
        }
        first if first.contains('=') => {
            let record = parse_telemetry(line)?;
            streams.telemetry.push(record);
            Some(SentenceKind::Telemetry)
        }
        _ => None,
    }
}

/// Parse the fields of a `$GPGGA` sentence
///
/// Requires a positive clock reading, both coordinates, the fix quality,
/// satellite count and HDOP. Altitude and the differential-GPS tail are
/// optional.
pub fn parse_gga(tokens: &[&str]) -> Option<GgaFix> {
    let utc = numeric_field(tokens, 1)?;
    if utc <= 0.0 {
        // No valid clock yet, the receiver is still acquiring
        return None;
    }

    let latitude = signed_coordinate(numeric_field(tokens, 2)?, field(tokens, 3));
    let longitude = signed_coordinate(numeric_field(tokens, 4)?, field(tokens, 5));

    Some(GgaFix {
        utc,
        latitude,
        longitude,
        fix_quality: int_field(tokens, 6)?,
        satellites: int_field(tokens, 7)?,
        hdop: numeric_field(tokens, 8)?,
        altitude_m: numeric_field(tokens, 9),
        geoid_separation_m: numeric_field(tokens, 11),
        dgps_age: field(tokens, 13).map(str::to_string),
        dgps_station: field(tokens, 14).map(str::to_string),
    })
}

/// Parse the fields of a `$GPRMC` sentence
///
/// Requires a positive clock reading, both coordinates, speed over ground
/// and the track angle. Status and date are carried through as-is; the
/// magnetic variation tail is optional.
pub fn parse_rmc(tokens: &[&str]) -> Option<RmcFix> {
    let utc = numeric_field(tokens, 1)?;
    if utc <= 0.0 {
        return None;
    }

    let latitude = signed_coordinate(numeric_field(tokens, 3)?, field(tokens, 4));
    let longitude = signed_coordinate(numeric_field(tokens, 5)?, field(tokens, 6));
    let speed_knots = numeric_field(tokens, 7)?;
    let track_deg = numeric_field(tokens, 8)?;

    Some(RmcFix {
        utc,
        status: field(tokens, 2).map(str::to_string).unwrap_or_default(),
        latitude,
        longitude,
        speed_knots,
        track_deg,
        date: field(tokens, 9).map(str::to_string).unwrap_or_default(),
        variation: pair_field(tokens, 10),
        checksum: field(tokens, 12).map(str::to_string),
    })
}

/// Parse one `key=value,key=value` telemetry record
///
/// Recognized keys: `lat`, `lng`, `alt`, `speed`, `sats`, `angle`, `fix`.
/// Unknown keys are ignored. A record without both coordinates, or one
/// explicitly reporting `fix=0`, yields `None`.
pub fn parse_telemetry(line: &str) -> Option<TelemetryFix> {
    let mut latitude = None;
    let mut longitude = None;
    let mut altitude = None;
    let mut speed = None;
    let mut satellites = None;
    let mut angle = None;
    let mut fix = None;

    for cell in line.split(',') {
        let (key, value) = match cell.split_once('=') {
            Some(pair) => pair,
            None => continue,
        };
        match key.trim() {
            "lat" => latitude = value.trim().parse().ok(),
            "lng" => longitude = value.trim().parse().ok(),
            "alt" => altitude = value.trim().parse().ok(),
            "speed" => speed = value.trim().parse().ok(),
            "sats" => satellites = value.trim().parse().ok(),
            "angle" => angle = value.trim().parse().ok(),
            "fix" => fix = value.trim().parse().ok(),
            _ => {}
        }
    }

    let record = TelemetryFix {
        latitude: latitude?,
        longitude: longitude?,
        altitude,
        speed,
        satellites,
        angle,
        fix,
    };
    if record.fix == Some(0) {
        return None;
    }
    Some(record)
}

/// Get the trimmed field at `index`, or `None` when the sentence is too
/// short or the cell is empty
fn field<'a>(tokens: &'a [&str], index: usize) -> Option<&'a str> {
    tokens
        .get(index)
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
}

fn numeric_field(tokens: &[&str], index: usize) -> Option<f64> {
    field(tokens, index)?.parse().ok()
}

fn int_field(tokens: &[&str], index: usize) -> Option<i32> {
    field(tokens, index)?.parse().ok()
}

/// Get two adjacent fields as a pair, requiring both to be present
fn pair_field(tokens: &[&str], index: usize) -> Option<(String, String)> {
    Some((
        field(tokens, index)?.to_string(),
        field(tokens, index + 1)?.to_string(),
    ))
}

/// Apply a hemisphere letter as a sign: S and W negate
fn signed_coordinate(value: f64, hemisphere: Option<&str>) -> f64 {
    match hemisphere {
        Some("S") | Some("W") => -value,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        line.split(',').collect()
    }

    #[test]
    fn test_parse_gga_full_sentence() {
        let tokens =
            split("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,2.1,0031*47");
        let gga = parse_gga(&tokens).unwrap();
        assert_eq!(gga.utc, 123519.0);
        assert_eq!(gga.latitude, 4807.038);
        assert_eq!(gga.longitude, 1131.0);
        assert_eq!(gga.fix_quality, 1);
        assert_eq!(gga.satellites, 8);
        assert_eq!(gga.hdop, 0.9);
        assert_eq!(gga.altitude_m, Some(545.4));
        assert_eq!(gga.geoid_separation_m, Some(46.9));
        assert_eq!(gga.dgps_age.as_deref(), Some("2.1"));
        assert_eq!(gga.dgps_station.as_deref(), Some("0031*47"));
    }

    #[test]
    fn test_parse_gga_short_sentence_keeps_optional_tail_empty() {
        let tokens = split("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9");
        let gga = parse_gga(&tokens).unwrap();
        assert_eq!(gga.satellites, 8);
        assert!(gga.altitude_m.is_none());
        assert!(gga.geoid_separation_m.is_none());
        assert!(gga.dgps_age.is_none());
        assert!(gga.dgps_station.is_none());
    }

    #[test]
    fn test_parse_gga_hemisphere_signs() {
        let tokens = split("$GPGGA,123519,4807.038,S,01131.000,W,1,08,0.9");
        let gga = parse_gga(&tokens).unwrap();
        assert_eq!(gga.latitude, -4807.038);
        assert_eq!(gga.longitude, -1131.0);
    }

    #[test]
    fn test_parse_gga_rejects_missing_or_bad_required_fields() {
        // Empty latitude
        assert!(parse_gga(&split("$GPGGA,123519,,N,01131.000,E,1,08,0.9")).is_none());
        // Garbage where the satellite count belongs
        assert!(parse_gga(&split("$GPGGA,123519,4807.038,N,01131.000,E,1,banana,0.9")).is_none());
        // Zero clock means the receiver has no time reference
        assert!(parse_gga(&split("$GPGGA,0,4807.038,N,01131.000,E,1,08,0.9")).is_none());
    }

    #[test]
    fn test_parse_rmc_full_sentence() {
        let tokens = split("$GPRMC,123519,A,4807.038,N,01131.000,E,22.4,84.4,230394,3.1,W,*6A");
        let rmc = parse_rmc(&tokens).unwrap();
        assert_eq!(rmc.utc, 123519.0);
        assert_eq!(rmc.status, "A");
        assert_eq!(rmc.latitude, 4807.038);
        assert_eq!(rmc.longitude, 1131.0);
        assert_eq!(rmc.speed_knots, 22.4);
        assert_eq!(rmc.track_deg, 84.4);
        assert_eq!(rmc.date, "230394");
        assert_eq!(
            rmc.variation,
            Some(("3.1".to_string(), "W".to_string()))
        );
        assert_eq!(rmc.checksum.as_deref(), Some("*6A"));
    }

    #[test]
    fn test_parse_rmc_short_sentence() {
        let tokens = split("$GPRMC,123519,A,4807.038,N,01131.000,E,22.4,84.4,230394");
        let rmc = parse_rmc(&tokens).unwrap();
        assert_eq!(rmc.speed_knots, 22.4);
        assert!(rmc.variation.is_none());
        assert!(rmc.checksum.is_none());
    }

    #[test]
    fn test_parse_rmc_requires_speed_and_track() {
        assert!(parse_rmc(&split("$GPRMC,123519,A,4807.038,N,01131.000,E,,84.4,230394")).is_none());
        assert!(parse_rmc(&split("$GPRMC,123519,A,4807.038,N,01131.000,E,22.4,,230394")).is_none());
    }

    #[test]
    fn test_parse_telemetry_record() {
        let record =
            parse_telemetry("lng=-77.673205,lat=43.185333,alt=170.2,speed=12.5,sats=7,angle=271.0,fix=1")
                .unwrap();
        assert_eq!(record.longitude, -77.673205);
        assert_eq!(record.latitude, 43.185333);
        assert_eq!(record.altitude, Some(170.2));
        assert_eq!(record.speed, Some(12.5));
        assert_eq!(record.satellites, Some(7));
        assert_eq!(record.angle, Some(271.0));
        assert_eq!(record.fix, Some(1));
    }

    #[test]
    fn test_parse_telemetry_requires_both_coordinates() {
        assert!(parse_telemetry("lng=-77.673205,speed=12.5").is_none());
        assert!(parse_telemetry("lat=43.185333,speed=12.5").is_none());
    }

    #[test]
    fn test_parse_telemetry_drops_records_without_fix() {
        assert!(parse_telemetry("lng=-77.673205,lat=43.185333,fix=0").is_none());
        // Missing fix flag is accepted
        assert!(parse_telemetry("lng=-77.673205,lat=43.185333").is_some());
    }

    #[test]
    fn test_parse_telemetry_ignores_unknown_keys() {
        let record = parse_telemetry("lng=-77.6,lat=43.1,battery=88,fix=1").unwrap();
        assert_eq!(record.longitude, -77.6);
        assert!(record.speed.is_none());
    }

    #[test]
    fn test_parse_line_dispatch() {
        let mut streams = SentenceStreams::default();
        assert_eq!(
            parse_line("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9", &mut streams),
            Some(SentenceKind::Gga)
        );
        assert_eq!(
            parse_line(
                "$GPRMC,123520,A,4807.038,N,01131.000,E,22.4,84.4,230394",
                &mut streams
            ),
            Some(SentenceKind::Rmc)
        );
        assert_eq!(
            parse_line("lng=-77.6,lat=43.1,fix=1", &mut streams),
            Some(SentenceKind::Telemetry)
        );
        // Unhandled sentence types and noise are skipped
        assert_eq!(parse_line("$GPGSV,3,1,11,03,03,111,00", &mut streams), None);
        assert_eq!(parse_line("", &mut streams), None);
        assert_eq!(parse_line("GPS logger v2.1 started", &mut streams), None);

        assert_eq!(streams.gga.len(), 1);
        assert_eq!(streams.rmc.len(), 1);
        assert_eq!(streams.telemetry.len(), 1);
    }

    #[test]
    fn test_parse_line_trims_line_endings() {
        let mut streams = SentenceStreams::default();
        let accepted = parse_line(
            "$GPRMC,123519,A,4807.038,N,01131.000,E,22.4,84.4,230394\r",
            &mut streams,
        );
        assert_eq!(accepted, Some(SentenceKind::Rmc));
        assert_eq!(streams.rmc[0].date, "230394");
    }
}
