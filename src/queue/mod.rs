//! Per-session delivery queues
//!
//! Each session owns one [`BlockingQueue`]. The producer pushes without ever
//! blocking; the session's consumer blocks in `pop` until a file arrives or
//! the registry tears the session down.

pub mod blocking;

pub use blocking::BlockingQueue;
