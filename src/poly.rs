//! The plain-text boundary polygon (`.poly`) format read by ground control software.
//!
//! ```text
//! #saved by geofence
//! 47.3000000000 8.5000000000
//! ...
//! END
//! ```
//!
//! One `lat lon` line per vertex, each ring closed. With several polygons, `END` follows each of
//! them; the file always ends with `END`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use geo_types::{Coord, Geometry, LineString, Polygon};
use log::info;

use crate::{Error, Geofence, Result};

pub const HEADER: &str = "#saved by geofence";
pub const SEPARATOR: &str = "END";

/// Write the geofence to any writer.
pub fn write_poly<W: Write>(geofence: &Geofence, writer: W) -> Result<()> {
    let rings: Vec<&[Coord]> = geofence
        .polygons()
        .iter()
        .map(|polygon| polygon.exterior().0.as_slice())
        .collect();
    write_rings(writer, &rings)
}

fn write_rings<W: Write>(mut writer: W, rings: &[&[Coord]]) -> Result<()> {
    writeln!(writer, "{HEADER}")?;

    for coords in rings {
        for pt in coords.iter() {
            write_vertex(&mut writer, *pt)?;
        }
        if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
            if first != last {
                write_vertex(&mut writer, *first)?;
            }
        }
        if rings.len() > 1 {
            writeln!(writer, "{SEPARATOR}")?;
        }
    }

    writeln!(writer, "{SEPARATOR}")?;
    Ok(())
}

fn write_vertex<W: Write>(writer: &mut W, pt: Coord) -> Result<()> {
    writeln!(writer, "{:.10} {:.10}", pt.y, pt.x)?;
    Ok(())
}

/// Create or overwrite `path`.
pub fn save_poly<P: AsRef<Path>>(geofence: &Geofence, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_poly(geofence, &mut writer)?;
    writer.flush()?;
    info!(
        "Wrote {} polygons with {} vertices to {}",
        geofence.polygons().len(),
        geofence.num_vertices(),
        path.display()
    );
    Ok(())
}

/// Like [`save_poly`], for geometry that isn't known to be a polygon or multi-polygon yet.
pub fn save_poly_geometry<P: AsRef<Path>>(geometry: Geometry, path: P) -> Result<()> {
    save_poly(&Geofence::try_from(geometry)?, path)
}

/// Parse a `.poly` file. Comment lines start with `#`; `END` finishes the current polygon.
/// Vertices after the last `END` still form a polygon.
pub fn read_poly<R: BufRead>(reader: R) -> Result<Geofence> {
    let mut polygons = Vec::new();
    let mut current: Vec<Coord> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == SEPARATOR {
            finish_polygon(&mut current, &mut polygons);
            continue;
        }
        current.push(parse_vertex(line).ok_or_else(|| {
            Error::Input(format!("poly line {}: expected `lat lon`, got {line:?}", idx + 1))
        })?);
    }
    finish_polygon(&mut current, &mut polygons);

    Geofence::from_polygons(polygons)
}

/// Read a `.poly` file from disk.
pub fn load_poly<P: AsRef<Path>>(path: P) -> Result<Geofence> {
    read_poly(BufReader::new(File::open(path)?))
}

fn parse_vertex(line: &str) -> Option<Coord> {
    let mut parts = line.split_whitespace();
    let lat = parts.next()?.parse().ok()?;
    let lon = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coord { x: lon, y: lat })
}

fn finish_polygon(current: &mut Vec<Coord>, polygons: &mut Vec<Polygon>) {
    if !current.is_empty() {
        polygons.push(Polygon::new(
            LineString::new(std::mem::take(current)),
            Vec::new(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, point, polygon, MultiPolygon};

    fn to_string(geofence: &Geofence) -> String {
        let mut out = Vec::new();
        write_poly(geofence, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_closed_square() {
        let square = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.)];
        let out = to_string(&Geofence::Single(square));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                HEADER,
                "0.0000000000 0.0000000000",
                "0.0000000000 1.0000000000",
                "1.0000000000 1.0000000000",
                "1.0000000000 0.0000000000",
                "0.0000000000 0.0000000000",
                SEPARATOR,
            ]
        );
    }

    #[test]
    fn test_forces_closure() {
        // geo's Polygon always closes its rings, so go around it
        let open = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 2.0, y: 0.0 },
            Coord { x: 2.0, y: 2.0 },
        ];
        let mut out = Vec::new();
        write_rings(&mut out, &[&open[..]]).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(6, lines.len());
        assert_eq!(lines[1], lines[4]);
        assert_eq!(SEPARATOR, lines[5]);
    }

    #[test]
    fn test_axis_order_and_precision() {
        let polygon = polygon![(x: 8.54321, y: 47.123456789012), (x: 8.6, y: 47.2), (x: 8.5, y: 47.2)];
        let out = to_string(&Geofence::Single(polygon));
        assert_eq!(Some("47.1234567890 8.5432100000"), out.lines().nth(1));
    }

    #[test]
    fn test_multiple_polygons() {
        let a = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)];
        let b = polygon![(x: 5., y: 5.), (x: 6., y: 5.), (x: 6., y: 6.)];
        let out = to_string(&Geofence::Multi(MultiPolygon::new(vec![a, b])));
        let lines: Vec<&str> = out.lines().collect();

        // Header, 4 vertices and END per polygon, final END
        assert_eq!(1 + 5 + 5 + 1, lines.len());
        assert_eq!(SEPARATOR, lines[5]);
        assert_eq!(SEPARATOR, lines[10]);
        assert_eq!(SEPARATOR, lines[11]);
    }

    #[test]
    fn test_every_emitted_ring_is_closed() {
        let a = polygon![(x: 0.1, y: 0.2), (x: 1.3, y: 0.), (x: 1., y: 1.7), (x: 0.2, y: 1.1)];
        let b = polygon![(x: 5., y: 5.), (x: 6., y: 5.), (x: 6., y: 6.)];
        let geofence = Geofence::Multi(MultiPolygon::new(vec![a, b]));
        let out = to_string(&geofence);

        let mut rings = vec![Vec::new()];
        for line in out.lines().skip(1) {
            if line == SEPARATOR {
                rings.push(Vec::new());
            } else if let Some(ring) = rings.last_mut() {
                ring.push(line);
            }
        }
        let rings: Vec<_> = rings.into_iter().filter(|r| !r.is_empty()).collect();
        assert_eq!(2, rings.len());
        for ring in rings {
            assert_eq!(ring.first(), ring.last());
        }

        let parsed = read_poly(out.as_bytes()).unwrap();
        assert_eq!(geofence.num_vertices(), parsed.num_vertices());
    }

    #[test]
    fn test_read_single() {
        let input = "#saved by someone else\n47.0 8.0\n47.0 8.1\n47.1 8.1\n47.0 8.0\nEND\n";
        let geofence = read_poly(input.as_bytes()).unwrap();
        assert_eq!(
            Geofence::Single(Polygon::new(
                line_string![(x: 8.0, y: 47.0), (x: 8.1, y: 47.0), (x: 8.1, y: 47.1), (x: 8.0, y: 47.0)],
                Vec::new(),
            )),
            geofence
        );
    }

    #[test]
    fn test_read_errors() {
        let err = read_poly("#header\n47.0 8.0\nnorth east\nEND\n".as_bytes()).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("line 3"));

        assert!(read_poly("47.0 8.0 100.0\n".as_bytes()).is_err());
        assert!(matches!(
            read_poly("#only a header\nEND\n".as_bytes()),
            Err(Error::Geometry(_))
        ));
    }

    #[test]
    fn test_only_polygons_can_be_saved() {
        let path = std::env::temp_dir().join("geofence-poly-type-error.poly");
        let err = save_poly_geometry(Geometry::Point(point!(x: 1., y: 1.)), &path).unwrap_err();
        assert!(matches!(err, Error::Type("Point")));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("geofence-{}.poly", std::process::id()));
        let square = polygon![(x: 8.0, y: 47.0), (x: 8.1, y: 47.0), (x: 8.1, y: 47.1), (x: 8.0, y: 47.1)];
        save_poly(&Geofence::Single(square), &path).unwrap();
        let loaded = load_poly(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(5, loaded.num_vertices());
    }
}
