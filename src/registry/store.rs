//! Session registry implementation
//!
//! The central registry that owns one queue per session and fans published
//! files out to all of them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::config::RegistryConfig;
use super::entry::{QueueHandle, SessionEntry, SessionStats};
use super::error::RegistryError;
use super::frame::{File, SessionId};

/// Central registry for all active sessions
///
/// Thread-safe via `RwLock`. Publishing takes the read lock, so the set of
/// sessions a file is delivered to is the snapshot registered when the
/// publish began; register and unregister take the write lock and therefore
/// land either wholly before or wholly after any publish.
pub struct SessionRegistry {
    /// Map of session ID to session entry
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,

    /// Source of registry-issued session IDs
    next_session_id: AtomicU64,

    /// Configuration
    config: RegistryConfig,
}

impl SessionRegistry {
    /// Create a new session registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new session registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_session_id: AtomicU64::new(1),
            config,
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Issue a session ID that this registry has never handed out before
    pub fn next_session_id(&self) -> SessionId {
        SessionId::from_raw(self.next_session_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Issue a fresh session ID and register it
    pub fn open_session(&self) -> (SessionId, QueueHandle) {
        let id = self.next_session_id();
        let handle = self.register(id);
        (id, handle)
    }

    /// Register a session
    ///
    /// If the session is already registered, its old queue is torn down
    /// first: unread files are discarded and consumers blocked on the old
    /// queue wake up with `None`. The session starts with an empty queue and
    /// receives only files published from now on.
    pub fn register(&self, id: SessionId) -> QueueHandle {
        let entry = SessionEntry::new(&self.config);
        let handle = entry.handle(id);

        let previous = self.sessions.write().insert(id, entry);

        match previous {
            Some(old) => {
                let discarded = old.teardown();
                tracing::info!(
                    session_id = %id,
                    discarded = discarded,
                    "Session re-registered"
                );
            }
            None => {
                tracing::info!(session_id = %id, "Session registered");
            }
        }

        handle
    }

    /// Unregister a session
    ///
    /// Discards unread files and wakes any consumer blocked on the queue.
    /// Unregistering an unknown session is a no-op. Returns whether a
    /// session was removed.
    pub fn unregister(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id);

        match removed {
            Some(entry) => {
                let discarded = entry.teardown();
                tracing::info!(
                    session_id = %id,
                    discarded = discarded,
                    delivered = entry.delivered.load(Ordering::Relaxed),
                    "Session unregistered"
                );
                true
            }
            None => {
                tracing::debug!(session_id = %id, "Unregister for unknown session ignored");
                false
            }
        }
    }

    /// Broadcast a file to every registered session
    ///
    /// Returns the number of sessions that received it.
    pub fn publish(&self, file: File) -> usize {
        let sessions = self.sessions.read();

        for (id, entry) in sessions.iter() {
            if entry.deliver(file.clone()) {
                tracing::warn!(
                    session_id = %id,
                    frame = file.frame(),
                    "Session queue full, dropped oldest file"
                );
            }
        }

        sessions.len()
    }

    /// Get the queue handle for a registered session
    pub fn get_queue(&self, id: SessionId) -> Result<QueueHandle, RegistryError> {
        self.sessions
            .read()
            .get(&id)
            .map(|entry| entry.handle(id))
            .ok_or(RegistryError::SessionNotFound(id))
    }

    /// Check if a session is registered
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().contains_key(&id)
    }

    /// Get total number of sessions
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Get statistics for one session
    pub fn session_stats(&self, id: SessionId) -> Option<SessionStats> {
        self.sessions.read().get(&id).map(|entry| entry.stats(id))
    }

    /// Get statistics for every session, ordered by session ID
    pub fn stats(&self) -> Vec<SessionStats> {
        let mut stats: Vec<_> = self
            .sessions
            .read()
            .iter()
            .map(|(id, entry)| entry.stats(*id))
            .collect();
        stats.sort_by_key(|s| s.session_id);
        stats
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.session_count())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn frame(n: u64) -> File {
        File::new(n, format!("frame{}.bin", n), vec![n as u8; 4])
    }

    #[test]
    fn test_register_and_get_queue() {
        let registry = SessionRegistry::new();
        let id = registry.next_session_id();

        let handle = registry.register(id);
        assert!(registry.contains(id));
        assert_eq!(registry.session_count(), 1);

        let fetched = registry.get_queue(id).unwrap();
        assert!(handle.same_queue(&fetched));
        assert_eq!(fetched.session_id(), id);
    }

    #[test]
    fn test_get_queue_unknown() {
        let registry = SessionRegistry::new();
        let id = SessionId::from_raw(42);

        let result = registry.get_queue(id);
        assert_eq!(result.unwrap_err(), RegistryError::SessionNotFound(id));
    }

    #[test]
    fn test_publish_to_all_sessions() {
        let registry = SessionRegistry::new();
        let (_, a) = registry.open_session();
        let (_, b) = registry.open_session();

        for n in 0..3 {
            assert_eq!(registry.publish(frame(n)), 2);
        }

        for handle in [a, b] {
            let frames: Vec<_> = (0..3).map(|_| handle.pop().unwrap().frame()).collect();
            assert_eq!(frames, vec![0, 1, 2]);
            assert!(handle.is_empty());
        }
    }

    #[test]
    fn test_publish_without_sessions() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.publish(frame(0)), 0);
        assert_eq!(registry.session_count(), 0);
    }

    #[test]
    fn test_reregister_discards_buffered() {
        let registry = SessionRegistry::new();
        let id = registry.next_session_id();

        let old = registry.register(id);
        registry.publish(frame(0));
        registry.publish(frame(1));
        assert_eq!(old.len(), 2);

        let new = registry.register(id);
        assert_eq!(registry.session_count(), 1);
        assert!(new.is_empty());
        assert!(!new.same_queue(&old));

        // Old handle is closed and empty
        assert!(old.is_closed());
        assert!(old.pop().is_none());

        registry.publish(frame(2));
        assert_eq!(new.pop().unwrap().frame(), 2);
    }

    #[test]
    fn test_late_session_starts_at_live_edge() {
        let registry = SessionRegistry::new();
        let (_, early) = registry.open_session();

        for n in 0..3 {
            registry.publish(frame(n));
        }

        let (_, late) = registry.open_session();
        registry.publish(frame(3));

        assert_eq!(early.len(), 4);
        assert_eq!(late.len(), 1);
        assert_eq!(late.pop().unwrap().frame(), 3);
    }

    #[test]
    fn test_unregister() {
        let registry = SessionRegistry::new();
        let (id, handle) = registry.open_session();
        registry.publish(frame(0));

        assert!(registry.unregister(id));
        assert!(!registry.contains(id));
        assert!(matches!(
            registry.get_queue(id),
            Err(RegistryError::SessionNotFound(_))
        ));
        assert!(handle.is_closed());

        // Publishes after unregister do not reach the old queue
        assert_eq!(registry.publish(frame(1)), 0);
        assert!(handle.is_empty());
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let registry = SessionRegistry::new();
        let (id, _handle) = registry.open_session();

        assert!(!registry.unregister(SessionId::from_raw(999)));
        assert!(registry.contains(id));
        assert_eq!(registry.session_count(), 1);
    }

    #[test]
    fn test_unregister_wakes_blocked_consumer() {
        let registry = Arc::new(SessionRegistry::new());
        let (id, handle) = registry.open_session();

        let consumer = thread::spawn(move || handle.pop());

        thread::sleep(Duration::from_millis(50));
        assert!(!consumer.is_finished());

        registry.unregister(id);
        assert!(consumer.join().unwrap().is_none());
    }

    #[test]
    fn test_slow_session_drops_oldest() {
        let registry = SessionRegistry::with_config(RegistryConfig::default().queue_capacity(2));
        let (slow_id, slow) = registry.open_session();
        let (_, fast) = registry.open_session();

        for n in 0..4 {
            registry.publish(frame(n));
            assert_eq!(fast.pop().unwrap().frame(), n);
        }

        assert_eq!(slow.len(), 2);
        assert_eq!(slow.dropped(), 2);
        assert_eq!(fast.dropped(), 0);
        assert_eq!(slow.pop().unwrap().frame(), 2);
        assert_eq!(slow.pop().unwrap().frame(), 3);

        let stats = registry.session_stats(slow_id).unwrap();
        assert_eq!(stats.delivered, 4);
        assert_eq!(stats.dropped, 2);
        assert_eq!(stats.queued, 0);
    }

    #[test]
    fn test_stats_ordered() {
        let registry = SessionRegistry::new();
        let (a, _) = registry.open_session();
        let (b, _) = registry.open_session();
        registry.publish(frame(0));

        let stats = registry.stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].session_id, a);
        assert_eq!(stats[1].session_id, b);
        assert!(stats.iter().all(|s| s.queued == 1));
        assert!(registry.session_stats(SessionId::from_raw(77)).is_none());
    }

    #[test]
    fn test_issued_ids_unique() {
        let registry = SessionRegistry::new();
        let a = registry.next_session_id();
        let b = registry.next_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_identical_bytes_across_sessions() {
        let registry = SessionRegistry::new();
        let (_, a) = registry.open_session();
        let (_, b) = registry.open_session();

        registry.publish(File::new(0, "frame0.bin", b"payload".to_vec()));

        let fa = a.pop().unwrap();
        let fb = b.pop().unwrap();
        assert_eq!(fa.data(), fb.data());
        assert_eq!(fa.data().as_ptr(), fb.data().as_ptr());
    }
}
