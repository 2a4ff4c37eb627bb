use log::info;

use crate::planar::{GeoPlanar, PlanarGeometry};
use crate::segment_buffer::buffer_segments;
use crate::stitch::stitch;
use crate::{Geofence, GeofenceConfig, Result, Waypoint};

/// Runs the whole path-to-geofence pipeline: buffer every segment, stitch the buffers together,
/// then simplify at half the buffer radius.
pub struct GeofenceBuilder<P = GeoPlanar> {
    config: GeofenceConfig,
    planar: P,
}

impl GeofenceBuilder<GeoPlanar> {
    pub fn new(config: GeofenceConfig) -> Self {
        Self::with_planar(config, GeoPlanar)
    }
}

impl<P: PlanarGeometry> GeofenceBuilder<P> {
    /// Use a different geometry backend
    pub fn with_planar(config: GeofenceConfig, planar: P) -> Self {
        Self { config, planar }
    }

    pub fn config(&self) -> &GeofenceConfig {
        &self.config
    }

    pub fn build(&self, waypoints: &[Waypoint]) -> Result<Geofence> {
        info!(
            "Building a {} m geofence around {} waypoints",
            self.config.buffer_meters,
            waypoints.len()
        );
        let buffered = buffer_segments(&self.planar, waypoints, &self.config)?;
        let stitched = stitch(&self.planar, &buffered.polygons)?;
        let geofence = stitched.simplify_coarse(&self.planar, buffered.radius_degrees / 2.0)?;
        info!(
            "Geofence has {} polygons and {} vertices",
            geofence.polygons().len(),
            geofence.num_vertices()
        );
        Ok(geofence)
    }

    /// Build, then [`Geofence::refine`] at the configured tolerance.
    pub fn build_refined(&self, waypoints: &[Waypoint]) -> Result<Geofence> {
        self.build(waypoints)?
            .refine(&self.planar, self.config.refine_tolerance)
    }
}

/// Build a geofence with default settings and the given corridor half-width.
pub fn create_geofence(waypoints: &[Waypoint], buffer_meters: f64) -> Result<Geofence> {
    GeofenceBuilder::new(GeofenceConfig::with_buffer_meters(buffer_meters)).build(waypoints)
}
