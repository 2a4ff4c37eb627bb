use geo_types::Polygon;
use log::debug;

use crate::geofence::{segments, Waypoint};
use crate::planar::PlanarGeometry;
use crate::{Error, GeofenceConfig, Result};

/// One buffered polygon per segment of the path, in path order.
#[derive(Clone, Debug)]
pub struct BufferedPath {
    pub polygons: Vec<Polygon>,
    /// The angular radius used for the last segment. Later stages use it to scale the
    /// simplification tolerance.
    pub radius_degrees: f64,
}

/// Buffers every segment of the path on its own. Each segment's radius comes from converting
/// `config.buffer_meters` at the segment's mean latitude and taking the larger of the latitude and
/// longitude equivalents, so the corridor is never narrower than asked for.
pub fn buffer_segments<P: PlanarGeometry>(
    planar: &P,
    waypoints: &[Waypoint],
    config: &GeofenceConfig,
) -> Result<BufferedPath> {
    if waypoints.len() < 2 {
        return Err(Error::Input(format!(
            "need at least 2 waypoints to buffer a path, got {}",
            waypoints.len()
        )));
    }
    if !(config.buffer_meters.is_finite() && config.buffer_meters > 0.0) {
        return Err(Error::Input(format!(
            "buffer distance must be positive, got {} m",
            config.buffer_meters
        )));
    }

    let mut polygons = Vec::with_capacity(waypoints.len() - 1);
    let mut radius_degrees = 0.0;
    for segment in segments(waypoints) {
        let distance = config
            .conversion
            .buffer_distance(config.buffer_meters, segment.mean_latitude());
        radius_degrees = distance.radius_degrees();
        polygons.push(planar.buffer_line(
            segment.line(),
            radius_degrees,
            config.quadrant_segments,
        ));
    }
    debug!(
        "Buffered {} segments, last radius {radius_degrees} degrees",
        polygons.len()
    );

    Ok(BufferedPath {
        polygons,
        radius_degrees,
    })
}
