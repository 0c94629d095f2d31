use std::fmt;

/// Errors raised while writing images or reading/writing parameter files.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error (permission denied, disk full, missing directory, ...)
    Io(std::io::Error),
    /// Pixel buffer does not match width × height
    PixelCount { expected: usize, actual: usize },
    /// Dimensions do not fit the bitmap header fields
    Dimensions { width: usize, height: usize },
    /// Parameter file could not be parsed
    Parse(String),
    /// Parameters could not be serialized
    Serialize(String),
    /// Parameters parsed but are out of range
    InvalidParams(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::PixelCount { expected, actual } => {
                write!(f, "expected {expected} pixels, got {actual}")
            }
            StorageError::Dimensions { width, height } => {
                write!(f, "{width}x{height} is too large for a bitmap")
            }
            StorageError::Parse(msg) => write!(f, "could not parse parameters: {msg}"),
            StorageError::Serialize(msg) => write!(f, "could not serialize parameters: {msg}"),
            StorageError::InvalidParams(msg) => write!(f, "invalid parameters: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<toml::de::Error> for StorageError {
    fn from(e: toml::de::Error) -> Self {
        StorageError::Parse(e.to_string())
    }
}

impl From<toml::ser::Error> for StorageError {
    fn from(e: toml::ser::Error) -> Self {
        StorageError::Serialize(e.to_string())
    }
}
