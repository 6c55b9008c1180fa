//! Error types for the map renderer

use thiserror::Error;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading points or rendering a map
#[derive(Error, Debug)]
pub enum Error {
    /// A precondition on an argument or configuration value was violated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Point input could not be parsed
    #[error("Invalid point input: {0}")]
    InputError(String),

    /// Failed to encode the rendered raster
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InputError(err.to_string())
    }
}

#[cfg(feature = "png")]
impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        Error::EncodeError(err.to_string())
    }
}
