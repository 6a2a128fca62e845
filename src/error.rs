//! Crate-level error type

use std::io;

use crate::registry::RegistryError;
use crate::source::SourceError;

/// Result alias for framecast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any error surfaced by framecast
#[derive(Debug)]
pub enum Error {
    /// Session registry error
    Registry(RegistryError),
    /// File source error
    Source(SourceError),
    /// I/O error outside the source loop
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Registry(e) => write!(f, "Registry error: {}", e),
            Error::Source(e) => write!(f, "Source error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Registry(e) => Some(e),
            Error::Source(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

impl From<SourceError> for Error {
    fn from(e: SourceError) -> Self {
        Error::Source(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
