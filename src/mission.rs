//! Waypoints from QGroundControl / Mission Planner plan files (`QGC WPL 110`).
//!
//! ```text
//! QGC WPL 110
//! 0	1	0	16	0	0	0	0	47.397742	8.545594	488.0	1
//! 1	0	3	16	0	0	0	0	47.398100	8.546100	30.0	1
//! ```
//!
//! Columns are tab-separated; latitude and longitude sit in columns 8 and 9.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::{Error, Result, Waypoint};

/// Lines starting with this are headers
pub const HEADER_MARKER: &str = "QGC";

const LATITUDE_COLUMN: usize = 8;
const LONGITUDE_COLUMN: usize = 9;

#[derive(Clone, Copy, Debug, Default)]
pub struct MissionOptions {
    /// Non-navigation commands (speed changes, servo actions, ...) are written with a 0, 0
    /// position. Drop them instead of dragging the path to null island.
    pub skip_zero_coordinates: bool,
}

/// Read every waypoint of a mission file, in order.
pub fn read_waypoints<P: AsRef<Path>>(path: P, options: MissionOptions) -> Result<Vec<Waypoint>> {
    let path = path.as_ref();
    info!("Reading mission from {}", path.display());
    parse_waypoints(BufReader::new(File::open(path)?), options)
}

pub fn parse_waypoints<R: BufRead>(reader: R, options: MissionOptions) -> Result<Vec<Waypoint>> {
    let mut waypoints = Vec::new();
    let mut skipped = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with(HEADER_MARKER) || line.trim().is_empty() {
            continue;
        }
        let waypoint = parse_line(&line).map_err(|message| Error::Mission {
            line: idx + 1,
            message,
        })?;
        if options.skip_zero_coordinates && waypoint.lat == 0.0 && waypoint.lon == 0.0 {
            skipped += 1;
            continue;
        }
        waypoints.push(waypoint);
    }
    if skipped > 0 {
        debug!("Skipped {skipped} mission items without a position");
    }
    info!("Read {} waypoints", waypoints.len());
    Ok(waypoints)
}

fn parse_line(line: &str) -> std::result::Result<Waypoint, String> {
    let columns: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if columns.len() <= LONGITUDE_COLUMN {
        return Err(format!(
            "expected at least {} tab-separated columns, found {}",
            LONGITUDE_COLUMN + 1,
            columns.len()
        ));
    }
    let lat = parse_coordinate(columns[LATITUDE_COLUMN], "latitude")?;
    let lon = parse_coordinate(columns[LONGITUDE_COLUMN], "longitude")?;
    Ok(Waypoint::new(lon, lat))
}

fn parse_coordinate(value: &str, name: &str) -> std::result::Result<f64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{name} {value:?} isn't a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSION: &str = "QGC WPL 110
0\t1\t0\t16\t0\t0\t0\t0\t47.397742\t8.545594\t488.0\t1
1\t0\t3\t16\t0\t0\t0\t0\t47.398100\t8.546100\t30.0\t1
2\t0\t3\t178\t1\t5\t-1\t0\t0\t0\t0\t1
3\t0\t3\t16\t0\t0\t0\t0\t47.398500\t8.546900\t30.0\t1
";

    #[test]
    fn test_parse() {
        let waypoints = parse_waypoints(MISSION.as_bytes(), MissionOptions::default()).unwrap();
        assert_eq!(4, waypoints.len());
        assert_eq!(Waypoint::new(8.545594, 47.397742), waypoints[0]);
        assert_eq!(Waypoint::new(0.0, 0.0), waypoints[2]);
    }

    #[test]
    fn test_skip_zero_coordinates() {
        let options = MissionOptions {
            skip_zero_coordinates: true,
        };
        let waypoints = parse_waypoints(MISSION.as_bytes(), options).unwrap();
        assert_eq!(3, waypoints.len());
        assert_eq!(Waypoint::new(8.5469, 47.3985), waypoints[2]);
    }

    #[test]
    fn test_header_only() {
        let waypoints =
            parse_waypoints("QGC WPL 110\n".as_bytes(), MissionOptions::default()).unwrap();
        assert!(waypoints.is_empty());
    }

    #[test]
    fn test_windows_line_endings() {
        let input = "QGC WPL 110\r\n0\t1\t0\t16\t0\t0\t0\t0\t1.5\t2.5\t0\t1\r\n";
        let waypoints = parse_waypoints(input.as_bytes(), MissionOptions::default()).unwrap();
        assert_eq!(vec![Waypoint::new(2.5, 1.5)], waypoints);
    }

    #[test]
    fn test_too_few_columns() {
        let input = "QGC WPL 110\n0\t1\t0\t16\t0\t0\t0\t0\t47.39\n";
        let err = parse_waypoints(input.as_bytes(), MissionOptions::default()).unwrap_err();
        assert!(err.is_input_error());
        assert!(matches!(err, Error::Mission { line: 2, .. }));
    }

    #[test]
    fn test_not_a_number() {
        let input = "0\t1\t0\t16\t0\t0\t0\t0\t47.39\teast\t0\t1\n";
        let err = parse_waypoints(input.as_bytes(), MissionOptions::default()).unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_waypoints("/nonexistent/mission.waypoints", MissionOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
