//! In-process storage backend

use std::{
    collections::HashMap,
    sync::Mutex,
};

use futures::future::{self, BoxFuture, FutureExt};

use super::StorageBackend;
use crate::error::{StorageError, StorageResult};

/// Map-backed storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one value
    pub fn with_item(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_string(), value.into());
        }
        storage
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.items
            .lock()
            .map(|items| items.get(key).cloned())
            .map_err(|e| StorageError::Unavailable(format!("Failed to lock memory storage: {}", e)))
    }

    fn write(&self, key: &str, value: String) -> StorageResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("Failed to lock memory storage: {}", e)))?;
        items.insert(key.to_string(), value);
        Ok(())
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StorageResult<Option<String>>> {
        future::ready(self.read(key)).boxed()
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, StorageResult<()>> {
        future::ready(self.write(key, value)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").await.unwrap(), None);
        storage.set_item("k", "v1".to_string()).await.unwrap();
        storage.set_item("k", "v2".to_string()).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v2"));
    }
}
