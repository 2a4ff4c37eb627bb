use geo::{LineString, MultiPolygon, Polygon, SimplifyVwPreserve, Validation};
use log::debug;

/// How many times the area threshold is halved before the rings are returned unchanged
const MAX_ATTEMPTS: usize = 8;

/// Topology-preserving Visvalingam-Whyatt simplification of a set of closed rings bounding
/// disjoint areas. The output vertices of each ring are a subsequence of its input vertices, and
/// no ring ends up crossing itself or overlapping another ring of the set.
///
/// `tolerance` is a distance; as in JTS, a vertex is dropped when the triangle it forms with its
/// neighbours has an area below `tolerance²`. All rings are handed to geo as one polygon (the
/// first as the shell, the rest as holes) so each candidate segment is checked against every
/// ring. geo doesn't promise a valid result on small rings, so if one comes back invalid, the
/// threshold is halved and the whole set is simplified again.
pub fn simplify_rings(rings: &[LineString], tolerance: f64) -> Vec<LineString> {
    let Some((first, rest)) = rings.split_first() else {
        return Vec::new();
    };
    let combined = Polygon::new(first.clone(), rest.to_vec());

    let mut epsilon = tolerance * tolerance;
    for _ in 0..MAX_ATTEMPTS {
        let (exterior, interiors) = combined.simplify_vw_preserve(epsilon).into_inner();
        let mut simplified = vec![exterior];
        simplified.extend(interiors);
        if rings_are_valid(&simplified) {
            return simplified;
        }
        debug!("Simplifying at area {epsilon} broke a ring, retrying at half");
        epsilon /= 2.0;
    }
    let (exterior, interiors) = combined.into_inner();
    std::iter::once(exterior).chain(interiors).collect()
}

/// True if the closed ring has at least 3 distinct points and doesn't cross or touch itself.
pub fn ring_is_simple(ring: &LineString) -> bool {
    Polygon::new(ring.clone(), Vec::new()).is_valid()
}

fn rings_are_valid(rings: &[LineString]) -> bool {
    MultiPolygon::new(
        rings
            .iter()
            .map(|ring| Polygon::new(ring.clone(), Vec::new()))
            .collect(),
    )
    .is_valid()
}
