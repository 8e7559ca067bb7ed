//! Persistence adapter - string-keyed storage for serialized collections.
//!
//! Each business context persists two independent JSON arrays (items,
//! transactions) under two distinct string keys, mirroring the whole
//! collection on every mutation. Persistence is best-effort and synchronous;
//! there is no retry, no write-ahead log, and no batching.

/// File-per-key JSON storage under a data directory
pub mod file;
/// In-memory storage for tests and throwaway sessions
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::errors::Result;

/// A durable string-keyed store for serialized payloads.
///
/// The crate's stand-in for origin-scoped browser local storage: values are
/// opaque strings, keys are scoped per business context by the context
/// profile, and a `put` overwrites the previous value wholesale.
pub trait Storage {
    /// Returns the payload stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the payload stored under `key`.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}
