//! Session identity and the frames broadcast to sessions
//!
//! This module defines the key type for identifying sessions and the
//! immutable file contents that are pushed onto every session queue.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

/// Opaque identifier for one consumer session
///
/// Issued by [`SessionRegistry::next_session_id`](super::SessionRegistry::next_session_id).
/// Carries no structure beyond equality and hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Wrap an identifier minted by an external collaborator
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw identifier
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// The full contents of one on-disk frame file
///
/// Cheap to clone: the bytes are reference counted, so every session queue
/// shares the same allocation. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    frame: u64,
    path: Arc<Path>,
    data: Bytes,
}

impl File {
    /// Create a file from bytes read for `frame`
    pub fn new(frame: u64, path: impl Into<PathBuf>, data: impl Into<Bytes>) -> Self {
        Self {
            frame,
            path: Arc::from(path.into()),
            data: data.into(),
        }
    }

    /// Frame number this file was read for
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Path the file was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the file was empty on disk
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for File {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
