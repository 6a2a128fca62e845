//! Producer statistics
//!
//! Per-session statistics live with the registry; see
//! [`SessionStats`](crate::registry::SessionStats).

pub mod metrics;

pub use metrics::{SourceSnapshot, SourceStats};
