use crate::units::DegreeConversion;

/// Tolerance in degrees used by [`crate::Geofence::refine`] when nothing else is asked for.
pub const DEFAULT_REFINE_TOLERANCE: f64 = 0.0001;

/// Everything that controls how a path becomes a geofence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeofenceConfig {
    /// Half-width of the corridor, in meters
    pub buffer_meters: f64,
    /// Edges approximating each quarter circle of the round caps
    pub quadrant_segments: usize,
    pub conversion: DegreeConversion,
    /// In degrees
    pub refine_tolerance: f64,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            buffer_meters: 10.0,
            quadrant_segments: 4,
            conversion: DegreeConversion::default(),
            refine_tolerance: DEFAULT_REFINE_TOLERANCE,
        }
    }
}

impl GeofenceConfig {
    pub fn with_buffer_meters(buffer_meters: f64) -> Self {
        Self {
            buffer_meters,
            ..Default::default()
        }
    }

    /// Parse a JSON config. Missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|err| crate::Error::Input(format!("bad config: {err}")))
    }
}
