/// Meters spanned by one degree of latitude.
pub const METERS_PER_DEGREE_LATITUDE: f64 = 111_045.0;

/// Meters spanned by one degree of longitude at the equator.
pub const METERS_PER_DEGREE_LONGITUDE: f64 = 87_870.18;

/// Calibration for the flat-Earth conversion between meters and degrees. Only valid for short
/// corridors away from the poles.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DegreeConversion {
    pub meters_per_degree_latitude: f64,
    /// At the equator; shrinks with the cosine of latitude
    pub meters_per_degree_longitude: f64,
}

impl Default for DegreeConversion {
    fn default() -> Self {
        Self {
            meters_per_degree_latitude: METERS_PER_DEGREE_LATITUDE,
            meters_per_degree_longitude: METERS_PER_DEGREE_LONGITUDE,
        }
    }
}

impl DegreeConversion {
    /// Express `meters` as angular offsets along each axis, valid around `latitude` (degrees).
    ///
    /// Undefined at exactly +/-90 degrees, where a degree of longitude has no width.
    pub fn buffer_distance(&self, meters: f64, latitude: f64) -> BufferDistance {
        let degrees_latitude = meters / self.meters_per_degree_latitude;
        let degrees_longitude =
            meters / (self.meters_per_degree_longitude * latitude.to_radians().cos());
        BufferDistance {
            meters,
            degrees_latitude,
            degrees_longitude,
        }
    }
}

/// A metric distance and its angular equivalents at one particular latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferDistance {
    pub meters: f64,
    pub degrees_latitude: f64,
    pub degrees_longitude: f64,
}

impl BufferDistance {
    /// The larger of the two angular equivalents. Buffering by this never produces a corridor
    /// narrower than `meters` along either axis, at the cost of over-buffering the other one.
    pub fn radius_degrees(&self) -> f64 {
        self.degrees_latitude.max(self.degrees_longitude)
    }
}

/// Returns `(degrees_latitude, degrees_longitude)` using the default calibration.
pub fn meters_to_degrees(meters: f64, latitude: f64) -> (f64, f64) {
    let distance = DegreeConversion::default().buffer_distance(meters, latitude);
    (distance.degrees_latitude, distance.degrees_longitude)
}
