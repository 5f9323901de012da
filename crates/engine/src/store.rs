//! Durable key/value storage for the session and cart blobs.
//!
//! A [`StateStore`] persists engine-defined serialized records under two
//! fixed logical keys (see [`keys`]), surviving process restarts but scoped
//! to one client installation. Backends:
//!
//! - [`FileStore`] - one JSON blob per key under a data directory
//! - [`MemoryStore`] - ephemeral, for private profiles and tests
//!
//! Stores only move strings; interpreting (and distrusting) the blob
//! contents is the engine's job.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Fixed logical keys for the two persisted blobs.
pub mod keys {
    /// Key for the active user session.
    pub const LOGGED_IN_USER: &str = "loggedInUser";

    /// Key for the cart snapshot.
    pub const CART_ITEMS: &str = "cartItems";
}

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Durable key/value store for engine blobs.
///
/// Futures returned by these methods need not be `Send`; the engine drives
/// one operation at a time on a single logical thread.
#[allow(async_fn_in_trait)]
pub trait StateStore {
    /// Read the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the blob under `key`. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed store: one `<key>.json` file per key under a data directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for ephemeral profiles and tests. Nothing survives the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get(keys::CART_ITEMS).await.unwrap().is_none());

        store.set(keys::CART_ITEMS, "[]").await.unwrap();
        assert_eq!(
            store.get(keys::CART_ITEMS).await.unwrap().as_deref(),
            Some("[]")
        );

        store.remove(keys::CART_ITEMS).await.unwrap();
        assert!(store.get(keys::CART_ITEMS).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_remove_absent_key() {
        let store = MemoryStore::new();
        assert!(store.remove("nothing-here").await.is_ok());
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.get(keys::LOGGED_IN_USER).await.unwrap().is_none());

        store.set(keys::LOGGED_IN_USER, r#"{"id":1}"#).await.unwrap();
        assert_eq!(
            store.get(keys::LOGGED_IN_USER).await.unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );

        // Overwrite replaces the previous blob
        store.set(keys::LOGGED_IN_USER, r#"{"id":2}"#).await.unwrap();
        assert_eq!(
            store.get(keys::LOGGED_IN_USER).await.unwrap().as_deref(),
            Some(r#"{"id":2}"#)
        );

        store.remove(keys::LOGGED_IN_USER).await.unwrap();
        assert!(store.get(keys::LOGGED_IN_USER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));
        store.set(keys::CART_ITEMS, "[]").await.unwrap();
        assert_eq!(
            store.get(keys::CART_ITEMS).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_file_store_remove_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.remove(keys::CART_ITEMS).await.is_ok());
    }
}
