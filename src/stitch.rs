use geo_types::{LineString, Polygon};
use log::debug;

use crate::planar::PlanarGeometry;
use crate::{Geofence, Result};

/// Stitches per-segment buffers back into one corridor. Buffering segments separately keeps sharp
/// turns well-behaved, but leaves overlapping shapes and internal seams; this merges their
/// boundary rings into one line network and polygonizes it.
///
/// Fails if nothing survives polygonization.
pub fn stitch<P: PlanarGeometry>(planar: &P, polygons: &[Polygon]) -> Result<Geofence> {
    let rings: Vec<LineString> = polygons
        .iter()
        .map(|polygon| polygon.exterior().clone())
        .collect();
    let network = planar.merge_rings(&rings);
    let merged = planar.polygonize(&network);
    debug!(
        "Stitched {} rings into {} polygons",
        rings.len(),
        merged.len()
    );
    Geofence::from_polygons(merged)
}
