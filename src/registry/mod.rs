//! Session registry for fan-out delivery
//!
//! The registry owns one blocking queue per session and pushes every
//! published file onto all of them. Sessions are fully isolated: a slow
//! session only ever delays itself.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<SessionRegistry>
//!                   ┌─────────────────────────────┐
//!                   │ sessions: HashMap<Id,       │
//!                   │   SessionEntry {            │
//!                   │     queue: BlockingQueue,   │
//!                   │   }                         │
//!                   │ >                           │
//!                   └──────────────┬──────────────┘
//!                                  │
//!         ┌────────────────────────┼────────────────────────┐
//!         │                        │                        │
//!         ▼                        ▼                        ▼
//!    [FileSource]             [Session 1]              [Session 2]
//!    read frame N             handle.pop()             handle.pop()
//!         │                        │                        │
//!         └──► registry.publish() ─┴──► broker send loop ───┘
//! ```
//!
//! # Zero-Copy Design
//!
//! [`File`] holds its contents in `bytes::Bytes`, so every queue shares the
//! same allocation. Publishing clones the handle, not the data.

pub mod config;
pub mod entry;
pub mod error;
pub mod frame;
pub mod store;

pub use config::RegistryConfig;
pub use entry::{QueueHandle, SessionStats};
pub use error::RegistryError;
pub use frame::{File, SessionId};
pub use store::SessionRegistry;
