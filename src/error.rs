use std::fmt;

/// Custom error types for GPS log processing
///
/// Malformed sentences never surface here: the parser skips them and the
/// fuser treats empty streams as a valid, empty input.
#[derive(Debug)]
pub enum GpsLogError {
    /// I/O errors
    Io(std::io::Error),
    /// Parse errors with context
    Parse(String),
    /// Export format error
    Export(String),
}

impl fmt::Display for GpsLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsLogError::Io(err) => write!(f, "I/O error: {}", err),
            GpsLogError::Parse(msg) => write!(f, "Parse error: {}", msg),
            GpsLogError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for GpsLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpsLogError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GpsLogError {
    fn from(err: std::io::Error) -> Self {
        GpsLogError::Io(err)
    }
}

impl From<anyhow::Error> for GpsLogError {
    fn from(err: anyhow::Error) -> Self {
        GpsLogError::Parse(err.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for GpsLogError {
    fn from(err: csv::Error) -> Self {
        GpsLogError::Export(err.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for GpsLogError {
    fn from(err: serde_json::Error) -> Self {
        GpsLogError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GpsLogError>;
