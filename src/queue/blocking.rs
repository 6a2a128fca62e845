//! Blocking FIFO queue
//!
//! A mutex-protected deque with a condition variable so that consumers can
//! block in [`BlockingQueue::pop`] without spinning. Producers never block.
//!
//! When a capacity is configured, a push onto a full queue discards the
//! oldest buffered element first, so a stalled consumer cannot grow memory
//! without bound.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

struct Inner<T> {
    items: VecDeque<T>,
    /// Set once the owning registry tears the queue down
    closed: bool,
    /// Elements discarded by the drop-oldest policy
    dropped: u64,
}

/// Multi-producer, multi-consumer FIFO with blocking pop
pub struct BlockingQueue<T> {
    inner: Mutex<Inner<T>>,
    available: Condvar,
    capacity: Option<usize>,
}

impl<T> BlockingQueue<T> {
    /// Create an unbounded queue
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Create a queue holding at most `capacity` elements (`None` = unbounded)
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                closed: false,
                dropped: 0,
            }),
            available: Condvar::new(),
            capacity: capacity.map(|c| c.max(1)),
        }
    }

    /// Append an element at the newest end and wake one waiter
    ///
    /// Returns the element evicted to make room, if any. Pushing onto a
    /// closed queue discards the element.
    pub fn push(&self, item: T) -> Option<T> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return None;
        }

        let mut evicted = None;
        if let Some(cap) = self.capacity {
            if inner.items.len() >= cap {
                evicted = inner.items.pop_front();
                inner.dropped += 1;
            }
        }

        inner.items.push_back(item);
        drop(inner);

        self.available.notify_one();
        evicted
    }

    /// Remove the oldest element, blocking while the queue is empty
    ///
    /// Returns `None` only once the queue has been closed.
    pub fn pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        loop {
            if inner.closed {
                return None;
            }
            if let Some(item) = inner.items.pop_front() {
                return Some(item);
            }
            self.available.wait(&mut inner);
        }
    }

    /// Like [`pop`](Self::pop), but gives up after `timeout`
    ///
    /// A timeout too large to express as a deadline waits without one.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.pop();
        };
        let mut inner = self.inner.lock();
        loop {
            if inner.closed {
                return None;
            }
            if let Some(item) = inner.items.pop_front() {
                return Some(item);
            }
            if self.available.wait_until(&mut inner, deadline).timed_out() {
                if inner.closed {
                    return None;
                }
                return inner.items.pop_front();
            }
        }
    }

    /// Remove the oldest element without blocking
    pub fn try_pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return None;
        }
        inner.items.pop_front()
    }

    /// Number of buffered elements
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Check if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Check if the owner has torn this queue down
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Configured capacity (`None` = unbounded)
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Total elements evicted by the drop-oldest policy
    pub fn dropped(&self) -> u64 {
        self.inner.lock().dropped
    }

    /// Discard every buffered element
    ///
    /// Returns how many were discarded.
    pub(crate) fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let n = inner.items.len();
        inner.items.clear();
        n
    }

    /// Discard buffered elements and wake every waiter with `None`
    pub(crate) fn close(&self) -> usize {
        let mut inner = self.inner.lock();
        let n = inner.items.len();
        inner.items.clear();
        inner.closed = true;
        drop(inner);

        self.available.notify_all();
        n
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BlockingQueue")
            .field("len", &inner.items.len())
            .field("capacity", &self.capacity)
            .field("closed", &inner.closed)
            .field("dropped", &inner.dropped)
            .finish()
    }
}
