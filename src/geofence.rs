use geo_types::{Coord, Geometry, Line, LineString, MultiPolygon, Polygon};

use crate::{Error, Result};

/// A point along the planned path, in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub lon: f64,
    pub lat: f64,
}

impl Waypoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Planar geometry uses x = longitude, y = latitude
impl From<Waypoint> for Coord {
    fn from(waypoint: Waypoint) -> Self {
        Coord {
            x: waypoint.lon,
            y: waypoint.lat,
        }
    }
}

impl From<Coord> for Waypoint {
    fn from(pt: Coord) -> Self {
        Self::new(pt.x, pt.y)
    }
}

/// Two consecutive waypoints
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Waypoint,
    pub end: Waypoint,
}

impl Segment {
    pub fn mean_latitude(&self) -> f64 {
        (self.start.lat + self.end.lat) / 2.0
    }

    pub fn line(&self) -> Line {
        Line::new(self.start, self.end)
    }
}

/// Consecutive pairs of the path
pub fn segments(waypoints: &[Waypoint]) -> impl Iterator<Item = Segment> + '_ {
    waypoints.windows(2).map(|pair| Segment {
        start: pair[0],
        end: pair[1],
    })
}

/// The buffered corridor around a path: one polygon when connected, several when the corridor
/// falls apart into disjoint lobes. Polygons never have holes.
#[derive(Clone, Debug, PartialEq)]
pub enum Geofence {
    Single(Polygon),
    Multi(MultiPolygon),
}

impl Geofence {
    /// Fails if there are no polygons at all
    pub fn from_polygons(mut polygons: Vec<Polygon>) -> Result<Self> {
        match polygons.len() {
            0 => Err(Error::Geometry(
                "polygonization produced no polygons".to_string(),
            )),
            1 => Ok(Geofence::Single(polygons.remove(0))),
            _ => Ok(Geofence::Multi(MultiPolygon::new(polygons))),
        }
    }

    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Geofence::Single(polygon) => std::slice::from_ref(polygon),
            Geofence::Multi(multi) => &multi.0,
        }
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        match self {
            Geofence::Single(polygon) => vec![polygon],
            Geofence::Multi(multi) => multi.0,
        }
    }

    /// The outer ring of every polygon
    pub fn rings(&self) -> Vec<LineString> {
        self.polygons()
            .iter()
            .map(|polygon| polygon.exterior().clone())
            .collect()
    }

    pub fn num_vertices(&self) -> usize {
        self.polygons()
            .iter()
            .map(|polygon| polygon.exterior().0.len())
            .sum()
    }
}

impl From<Geofence> for Geometry {
    fn from(geofence: Geofence) -> Self {
        match geofence {
            Geofence::Single(polygon) => Geometry::Polygon(polygon),
            Geofence::Multi(multi) => Geometry::MultiPolygon(multi),
        }
    }
}

impl TryFrom<Geometry> for Geofence {
    type Error = Error;

    fn try_from(geometry: Geometry) -> Result<Self> {
        match geometry {
            Geometry::Polygon(polygon) => Ok(Geofence::Single(polygon)),
            Geometry::MultiPolygon(multi) => Ok(Geofence::Multi(multi)),
            Geometry::Point(_) => Err(Error::Type("Point")),
            Geometry::Line(_) => Err(Error::Type("Line")),
            Geometry::LineString(_) => Err(Error::Type("LineString")),
            Geometry::MultiPoint(_) => Err(Error::Type("MultiPoint")),
            Geometry::MultiLineString(_) => Err(Error::Type("MultiLineString")),
            Geometry::GeometryCollection(_) => Err(Error::Type("GeometryCollection")),
            Geometry::Rect(_) => Err(Error::Type("Rect")),
            Geometry::Triangle(_) => Err(Error::Type("Triangle")),
        }
    }
}
