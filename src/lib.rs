//! # framecast
//!
//! Fan out a numbered sequence of on-disk files (for example frames written
//! by a renderer) to any number of independently paced sessions.
//!
//! - [`FileSource`] polls `<dir>/<prefix><N><suffix>`, retries while the
//!   next frame is missing, and throttles its pace.
//! - [`SessionRegistry`] keeps one blocking queue per session and pushes
//!   every published [`File`] onto all of them.
//! - A broker serving remote clients calls [`SessionRegistry::register`],
//!   [`SessionRegistry::get_queue`] and [`QueueHandle::pop`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use framecast::{FileSource, SessionRegistry, SourceConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let registry = Arc::new(SessionRegistry::new());
//! let (_id, queue) = registry.open_session();
//!
//! let source = FileSource::new(SourceConfig::new("/tmp/render", "frame", 0, ".png"))?;
//! let cancel = CancellationToken::new();
//! let worker = source.spawn(Arc::clone(&registry), cancel.clone())?;
//!
//! while let Some(file) = queue.pop() {
//!     println!("frame {} ({} bytes)", file.frame(), file.len());
//! }
//! # let _ = worker;
//! # Ok::<(), framecast::Error>(())
//! ```

pub mod error;
pub mod queue;
pub mod registry;
pub mod source;
pub mod stats;

pub use error::{Error, Result};
pub use queue::BlockingQueue;
pub use registry::{File, QueueHandle, RegistryConfig, RegistryError, SessionId, SessionRegistry};
pub use source::{FileSource, RetryBudget, SourceConfig, SourceError, SourceSummary};
