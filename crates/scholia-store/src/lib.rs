//! Persistence for Scholia's client-local stores.
//!
//! Each store keeps its whole state in memory and mirrors it, as one JSON
//! snapshot, into a [`KeyValueStorage`](scholia_core::storage::KeyValueStorage)
//! backend. [`SqliteStorage`] wraps [`tokio_rusqlite`] so database access runs
//! on a dedicated thread without blocking the async runtime;
//! [`MemoryStorage`] keeps blobs in-process.

mod memory;
mod persisted;
mod schema;
mod sqlite;
mod stores;

pub mod error;

pub use error::{Error, Result};
pub use memory::MemoryStorage;
pub use persisted::Persisted;
pub use sqlite::SqliteStorage;
pub use stores::{Annotations, Doubts, Notes, Profile};
