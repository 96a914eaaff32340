//! Storage error types.
//!
//! Defined as a typed enum so callers can tell a missing or unreadable
//! backend apart from persisted data that no longer deserializes.

use thiserror::Error;

/// Errors raised by [`KeyValueStore`](crate::store::KeyValueStore) backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value exists but could not be decoded.
    #[error("corrupt value under key '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// A value could not be encoded for storage.
    #[error("failed to encode value for key '{key}': {message}")]
    Encode { key: String, message: String },
}

impl StoreError {
    /// Returns `true` if the stored data itself is bad and should be discarded.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}
