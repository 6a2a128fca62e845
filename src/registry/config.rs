//! Registry configuration

/// Default per-session queue depth
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Session registry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum files buffered per session (`None` = unbounded)
    ///
    /// When a session's queue is full, publishing discards that session's
    /// oldest unread file.
    pub queue_capacity: Option<usize>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            queue_capacity: Some(DEFAULT_QUEUE_CAPACITY),
        }
    }
}

impl RegistryConfig {
    /// Set the per-session queue depth
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity.max(1));
        self
    }

    /// Let session queues grow without bound
    pub fn unbounded(mut self) -> Self {
        self.queue_capacity = None;
        self
    }
}
