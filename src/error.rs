use std::io;

/// Every way building a geofence can fail. None of these are recoverable; the run stops at the
/// stage that noticed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("mission file line {line}: {message}")]
    Mission { line: usize, message: String },

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("expected a polygon or multi-polygon, got {0}")]
    Type(&'static str),
}

impl Error {
    /// Malformed waypoints, a degenerate path, or bad parameters
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_) | Error::Mission { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
