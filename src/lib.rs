//! Turn a planned vehicle path into a geofence: a corridor of fixed real-world width around the
//! path, stitched into simple polygons and written out as a `.poly` boundary file.

mod config;
mod error;
mod geofence;
pub mod mission;
mod pipeline;
pub mod planar;
pub mod poly;
mod segment_buffer;
mod simplify;
mod stitch;
pub mod units;

pub use self::config::{GeofenceConfig, DEFAULT_REFINE_TOLERANCE};
pub use self::error::{Error, Result};
pub use self::geofence::{segments, Geofence, Segment, Waypoint};
pub use self::pipeline::{create_geofence, GeofenceBuilder};
pub use self::segment_buffer::{buffer_segments, BufferedPath};
pub use self::stitch::stitch;
pub use self::units::{meters_to_degrees, BufferDistance, DegreeConversion};
