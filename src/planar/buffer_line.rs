//! Round-capped buffers of single segments.
//!
//! `geo::Buffer` can do this too, but its round caps put their vertices on the circle, so every
//! cap edge is a chord that cuts inside the requested radius. A geofence corridor must never be
//! narrower than asked for, so the caps here are circumscribed instead.

use geo::{Coord, Line, LineString, Polygon};

/// Buffers a single line by `radius`, producing a stadium: two straight sides joined by round
/// caps. `quadrant_segments` edges approximate each quarter circle. A zero-length line becomes a
/// circle.
///
/// Cap vertices are pushed slightly outside the circle, so every edge is tangent to it rather
/// than a chord inside it. No point of the polygon boundary is closer than `radius` to the line.
pub fn buffer_line(line: Line, radius: f64, quadrant_segments: usize) -> Polygon {
    let quadrant_segments = quadrant_segments.max(1);
    let step = 90.0 / quadrant_segments as f64;
    let vertex_radius = radius / (step / 2.0).to_radians().cos();

    let mut pts = Vec::with_capacity(4 * quadrant_segments + 3);
    if line.start == line.end {
        for i in 0..4 * quadrant_segments {
            pts.push(project_away(line.start, i as f64 * step, vertex_radius));
        }
    } else {
        let angle = line_angle_degrees(line);
        // Counter-clockwise: sweep around the end from the right side to the left side, then
        // around the start back to the right side
        for (center, from_angle) in [(line.end, angle - 90.0), (line.start, angle + 90.0)] {
            for i in 0..=2 * quadrant_segments {
                pts.push(project_away(center, from_angle + i as f64 * step, vertex_radius));
            }
        }
    }
    Polygon::new(LineString::new(pts), Vec::new())
}

fn line_angle_degrees(line: Line) -> f64 {
    line.dy().atan2(line.dx()).to_degrees()
}

fn project_away(pt: Coord, angle_degrees: f64, distance: f64) -> Coord {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Coord {
        x: pt.x + distance * cos,
        y: pt.y + distance * sin,
    }
}
