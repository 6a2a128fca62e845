//! Session entry and queue handle types
//!
//! This module defines the per-session state stored in the registry and the
//! handle a consumer uses to read its queue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::queue::BlockingQueue;

use super::config::RegistryConfig;
use super::frame::{File, SessionId};

/// Entry for a single session in the registry
pub struct SessionEntry {
    /// Delivery queue shared with the session's handles
    pub(super) queue: Arc<BlockingQueue<File>>,

    /// Files pushed onto this session's queue
    pub(super) delivered: AtomicU64,

    /// When the session was registered
    pub registered_at: Instant,
}

impl SessionEntry {
    /// Create a new entry with an empty queue
    pub(super) fn new(config: &RegistryConfig) -> Self {
        Self {
            queue: Arc::new(BlockingQueue::with_capacity(config.queue_capacity)),
            delivered: AtomicU64::new(0),
            registered_at: Instant::now(),
        }
    }

    /// Push a file onto this session's queue
    ///
    /// Returns true if an older unread file was evicted to make room.
    pub(super) fn deliver(&self, file: File) -> bool {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        self.queue.push(file).is_some()
    }

    /// Tear the queue down, waking any consumer blocked on it
    ///
    /// Returns the number of unread files discarded.
    pub(super) fn teardown(&self) -> usize {
        self.queue.close()
    }

    /// Get a handle to this session's queue
    pub(super) fn handle(&self, id: SessionId) -> QueueHandle {
        QueueHandle {
            id,
            queue: Arc::clone(&self.queue),
        }
    }

    /// Snapshot this session's statistics
    pub(super) fn stats(&self, id: SessionId) -> SessionStats {
        SessionStats {
            session_id: id,
            queued: self.queue.len(),
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.queue.dropped(),
            age: self.registered_at.elapsed(),
        }
    }
}

/// Consumer-side handle to one session's queue
///
/// Cloning the handle does not clone the queue. A handle stays valid after
/// its session is unregistered or re-registered, but the queue it refers to
/// is then closed: `pop` returns `None` and the consumer should fetch a new
/// handle with [`get_queue`](super::SessionRegistry::get_queue).
#[derive(Debug, Clone)]
pub struct QueueHandle {
    id: SessionId,
    queue: Arc<BlockingQueue<File>>,
}

impl QueueHandle {
    /// Session this handle belongs to
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    /// Take the next file, blocking until one is published
    ///
    /// Returns `None` once the session has been torn down.
    pub fn pop(&self) -> Option<File> {
        self.queue.pop()
    }

    /// Take the next file, giving up after `timeout`
    pub fn pop_timeout(&self, timeout: Duration) -> Option<File> {
        self.queue.pop_timeout(timeout)
    }

    /// Take the next file if one is buffered
    pub fn try_pop(&self) -> Option<File> {
        self.queue.try_pop()
    }

    /// Number of unread files
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no files are waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Check if the session has been torn down
    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }

    /// Files this session lost because it fell behind
    pub fn dropped(&self) -> u64 {
        self.queue.dropped()
    }

    /// Check whether two handles refer to the same queue
    pub fn same_queue(&self, other: &QueueHandle) -> bool {
        Arc::ptr_eq(&self.queue, &other.queue)
    }
}

/// Statistics for a session
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// Session identifier
    pub session_id: SessionId,
    /// Unread files currently buffered
    pub queued: usize,
    /// Files pushed onto the queue since registration
    pub delivered: u64,
    /// Files evicted because the queue was full
    pub dropped: u64,
    /// Time since registration
    pub age: Duration,
}
