//! Registry error types
//!
//! Error types for session registry operations.

use super::frame::SessionId;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No queue is registered for the session
    SessionNotFound(SessionId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
        }
    }
}

impl std::error::Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RegistryError::SessionNotFound(SessionId::from_raw(7));
        assert_eq!(err.to_string(), "Session not found: session-7");
    }
}
