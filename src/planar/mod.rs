//! The 2D geometry primitives the geofence pipeline is built on, behind one small trait.
//!
//! Everything here works on plain planar coordinates. Callers are expected to have converted
//! distances into the same units as the coordinates (degrees, for geographic input).

mod buffer_line;
mod simplify_preserve;

use geo::{BooleanOps, Line, LineString, MultiLineString, MultiPolygon, Polygon};
use log::warn;

pub use self::buffer_line::buffer_line;
pub use self::simplify_preserve::{ring_is_simple, simplify_rings};

/// The four capabilities the geofence pipeline needs from a 2D geometry library.
pub trait PlanarGeometry {
    /// Buffer one line by `radius`, with round caps approximated by `quadrant_segments` edges per
    /// quarter circle.
    fn buffer_line(&self, line: Line, radius: f64, quadrant_segments: usize) -> Polygon;

    /// Node a set of closed rings against each other and merge them into a network of simple
    /// lines. Overlaps and seams between rings disappear.
    fn merge_rings(&self, rings: &[LineString]) -> LineNetwork;

    /// Derive simple polygons from a merged line network.
    fn polygonize(&self, network: &LineNetwork) -> Vec<Polygon>;

    /// Reduce the vertices of every ring within `tolerance`, without making any ring cross itself
    /// or another ring in the set.
    fn simplify(&self, rings: &[LineString], tolerance: f64) -> Vec<LineString>;
}

/// Line pieces produced by merging rings
#[derive(Clone, Debug, PartialEq)]
pub struct LineNetwork(pub MultiLineString);

impl Default for LineNetwork {
    fn default() -> Self {
        LineNetwork(MultiLineString::new(Vec::new()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkShape {
    Empty,
    Line,
    Lines,
}

impl LineNetwork {
    pub fn lines(&self) -> &[LineString] {
        &self.0 .0
    }

    pub fn shape(&self) -> NetworkShape {
        match self.lines().len() {
            0 => NetworkShape::Empty,
            1 => NetworkShape::Line,
            _ => NetworkShape::Lines,
        }
    }
}

/// [`PlanarGeometry`] on top of the `geo` crate: boolean union to merge rings, and its
/// topology-preserving Visvalingam-Whyatt to simplify them.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoPlanar;

impl PlanarGeometry for GeoPlanar {
    fn buffer_line(&self, line: Line, radius: f64, quadrant_segments: usize) -> Polygon {
        buffer_line(line, radius, quadrant_segments)
    }

    fn merge_rings(&self, rings: &[LineString]) -> LineNetwork {
        let mut merged = MultiPolygon::new(Vec::new());
        for ring in rings {
            if ring.0.len() < 4 {
                warn!("Skipping a ring with only {} points", ring.0.len());
                continue;
            }
            let polygon = Polygon::new(ring.clone(), Vec::new());
            merged = merged.union(&MultiPolygon::new(vec![polygon]));
        }

        let mut lines = Vec::new();
        for polygon in merged {
            let (exterior, interiors) = polygon.into_inner();
            // Geofences are filled; a path looping back on itself doesn't leave a hole
            if !interiors.is_empty() {
                warn!(
                    "Filling in {} holes enclosed by the path, widening the geofence past the corridor",
                    interiors.len()
                );
            }
            lines.push(exterior);
        }
        LineNetwork(MultiLineString::new(lines))
    }

    fn polygonize(&self, network: &LineNetwork) -> Vec<Polygon> {
        network
            .lines()
            .iter()
            .filter_map(|line| {
                if line.is_closed() && line.0.len() >= 4 {
                    Some(Polygon::new(line.clone(), Vec::new()))
                } else {
                    warn!(
                        "Dropping a dangling piece of the network with {} points",
                        line.0.len()
                    );
                    None
                }
            })
            .collect()
    }

    fn simplify(&self, rings: &[LineString], tolerance: f64) -> Vec<LineString> {
        simplify_rings(rings, tolerance)
    }
}

/// Euclidean distance from `pt` to the segment between `start` and `end`.
#[cfg(test)]
pub(crate) fn point_segment_distance(pt: geo::Coord, start: geo::Coord, end: geo::Coord) -> f64 {
    let delta = end - start;
    let length_squared = delta.x * delta.x + delta.y * delta.y;
    let closest = if length_squared == 0.0 {
        start
    } else {
        let t = ((pt - start).x * delta.x + (pt - start).y * delta.y) / length_squared;
        start + delta * t.clamp(0.0, 1.0)
    };
    (pt - closest).x.hypot((pt - closest).y)
}
