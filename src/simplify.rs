use geo::Area;
use geo_types::{LineString, Polygon};
use log::debug;

use crate::planar::{NetworkShape, PlanarGeometry};
use crate::{Error, Geofence, Result};

impl Geofence {
    /// Reduce vertices of every ring within `tolerance` (degrees), treating all rings as one set
    /// so no ring ends up crossing itself or another. Meant to clean up stitching seams right
    /// after [`crate::stitch`], with half the buffer radius as tolerance.
    pub fn simplify_coarse<P: PlanarGeometry>(&self, planar: &P, tolerance: f64) -> Result<Self> {
        check_tolerance(tolerance)?;
        let before = self.num_vertices();
        let polygons = planar
            .simplify(&self.rings(), tolerance)
            .into_iter()
            .map(into_polygon)
            .collect::<Result<Vec<_>>>()?;
        let simplified = Geofence::from_polygons(polygons)?;
        debug!(
            "Simplified {before} vertices down to {} at tolerance {tolerance}",
            simplified.num_vertices()
        );
        Ok(simplified)
    }

    /// Shrink an already stitched geofence further. Each polygon is simplified on its own, the
    /// results are merged and polygonized again, and the merged geofence gets one more
    /// [`Geofence::simplify_coarse`] pass at the same tolerance.
    ///
    /// Fails if merging the simplified rings leaves no lines at all.
    pub fn refine<P: PlanarGeometry>(&self, planar: &P, tolerance: f64) -> Result<Self> {
        check_tolerance(tolerance)?;

        let mut rings = Vec::new();
        for polygon in self.polygons() {
            for ring in planar.simplify(std::slice::from_ref(polygon.exterior()), tolerance) {
                rings.push(into_polygon(ring)?.into_inner().0);
            }
        }

        let network = planar.merge_rings(&rings);
        if network.shape() == NetworkShape::Empty {
            return Err(Error::Geometry(
                "unexpected geometry after merging simplified rings: no lines".to_string(),
            ));
        }
        let merged = Geofence::from_polygons(planar.polygonize(&network))?;
        merged.simplify_coarse(planar, tolerance)
    }
}

fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(())
    } else {
        Err(Error::Input(format!(
            "simplification tolerance must be zero or positive, got {tolerance}"
        )))
    }
}

fn into_polygon(ring: LineString) -> Result<Polygon> {
    let num_points = ring.0.len();
    let polygon = Polygon::new(ring, Vec::new());
    if num_points < 4 || polygon.unsigned_area() == 0.0 {
        return Err(Error::Geometry(format!(
            "simplification left a degenerate ring with {num_points} points"
        )));
    }
    Ok(polygon)
}
