//! Frame file producer
//!
//! This module provides:
//! - Source configuration (directory, filename pattern, retry and pacing)
//! - Whole-file frame reads
//! - The polling loop that publishes frames to the session registry

pub mod config;
pub mod error;
pub mod poller;
pub mod reader;

pub use config::{RetryBudget, SourceConfig};
pub use error::SourceError;
pub use poller::{FileSource, SourceSummary};
pub use reader::read_frame;
