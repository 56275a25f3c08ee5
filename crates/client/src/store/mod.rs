//! Durable key-value persistence for the cart and wishlist.
//!
//! The local store holds two named collections under the string keys
//! [`CART_KEY`] and [`WISHLIST_KEY`], each serialized as JSON. The backend is
//! swappable ([`FileStore`] for real use, [`MemoryStore`] for tests) without
//! changing the manager's contract.
//!
//! # Failure semantics
//!
//! Persistence failures never propagate past [`LocalStore`]: a failed read
//! hydrates an empty collection, a failed write is logged and dropped, and
//! the session continues in-memory-only from that point.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Store key for the cart collection.
pub const CART_KEY: &str = "cart";

/// Store key for the wishlist collection.
pub const WISHLIST_KEY: &str = "wishlist";

/// Errors that can occur in a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem read/write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A durable string key-value backend.
///
/// Implementations only need get/set of whole serialized collections; the
/// diffing and mutation logic lives above this trait.
pub trait StoreBackend: Send {
    /// Read the raw value for a key, `None` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the raw value for a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The persisted local store: a JSON (de)serialization layer over a
/// [`StoreBackend`], with degrade-to-memory failure semantics.
pub struct LocalStore {
    backend: Box<dyn StoreBackend>,
}

impl LocalStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Create a store with no durable backing (useful in tests).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Load and deserialize a collection, falling back to the default on any
    /// read or parse failure.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read local store, starting empty");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt local store value, starting empty");
                T::default()
            }
        }
    }

    /// Serialize and persist a collection.
    ///
    /// Write failures are logged, not returned: the in-memory state above
    /// this store stays authoritative for the rest of the session.
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize local store value");
                return;
            }
        };

        if let Err(e) = self.backend.write(key, &raw) {
            tracing::warn!(key, error = %e, "Failed to persist local store, continuing in-memory");
        }
    }
}
