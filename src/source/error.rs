//! File source error types

use std::io;
use std::path::PathBuf;

/// Error type for the file source
#[derive(Debug)]
pub enum SourceError {
    /// The source cannot start with this configuration
    InvalidConfig(String),
    /// The next frame never appeared within the retry budget
    Exhausted {
        /// Frame that could not be read
        frame: u64,
        /// Path that was polled
        path: PathBuf,
        /// Failed attempts made
        attempts: u32,
        /// Error from the last attempt
        source: io::Error,
    },
    /// The last representable frame number was published
    FrameOverflow {
        /// Frame that was published last
        frame: u64,
    },
    /// The source thread could not be started
    Spawn(io::Error),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::InvalidConfig(msg) => write!(f, "Invalid source config: {}", msg),
            SourceError::Exhausted {
                frame,
                path,
                attempts,
                ..
            } => write!(
                f,
                "No file for frame {} at {} after {} attempts",
                frame,
                path.display(),
                attempts
            ),
            SourceError::FrameOverflow { frame } => {
                write!(f, "Frame number {} is the last one representable", frame)
            }
            SourceError::Spawn(e) => write!(f, "Failed to start source thread: {}", e),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Exhausted { source, .. } => Some(source),
            SourceError::Spawn(e) => Some(e),
            SourceError::InvalidConfig(_) | SourceError::FrameOverflow { .. } => None,
        }
    }
}
