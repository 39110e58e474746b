//! Storage backend trait definition.
//!
//! Abstraction over the byte store holding uploaded file content. The
//! database keeps metadata only; bytes are addressed by namespace and key.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

/// Storage error types
#[derive(Debug)]
pub enum StorageError {
    /// Object not found
    NotFound(String),
    /// IO error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(key) => write!(f, "Object not found: {}", key),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Other(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Pluggable byte store. Keys are grouped by namespace so different object
/// kinds can get different storage policies later.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Get an object by namespace and key
    async fn get(&self, namespace: &str, key: &str) -> StorageResult<Bytes>;

    /// Store an object
    async fn put(&self, namespace: &str, key: &str, data: Bytes) -> StorageResult<()>;

    /// Delete an object; deleting an absent key is not an error
    async fn delete(&self, namespace: &str, key: &str) -> StorageResult<()>;

    /// Check whether an object exists
    async fn exists(&self, namespace: &str, key: &str) -> StorageResult<bool>;
}

/// Well-known namespaces used by this server.
pub mod namespaces {
    /// Uploaded image content
    pub const IMAGES: &str = "images";
}
