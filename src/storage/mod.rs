//! Key-value storage backends
//!
//! The store writes the whole serialized collection under one key on every
//! mutation and reads it back once at startup.

pub mod file;
pub mod memory;

use futures::future::BoxFuture;

use crate::error::StorageResult;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key holding the JSON array of timers
pub const STORAGE_KEY: &str = "@timers";

/// Simple get/set-by-key storage collaborator
pub trait StorageBackend: Send + Sync {
    /// Read the value under `key`, `None` when nothing was stored
    fn get_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StorageResult<Option<String>>>;

    /// Overwrite the value under `key`
    fn set_item<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, StorageResult<()>>;
}
