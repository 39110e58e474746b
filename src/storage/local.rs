//! Local filesystem storage backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use super::backend::{StorageBackend, StorageError, StorageResult};

/// Local filesystem storage backend.
///
/// Stores objects in a directory structure:
/// ```text
/// {base_path}/
///   {namespace}/
///     {key[0..2]}/     # First 2 chars of key for sharding
///       {key[2..]}     # Rest of key as filename
/// ```
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage backend
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the full path for a key
    fn key_path(&self, namespace: &str, key: &str) -> PathBuf {
        if key.len() >= 2 {
            // Shard by first 2 characters for better filesystem performance
            self.base_path
                .join(namespace)
                .join(&key[..2])
                .join(&key[2..])
        } else {
            self.base_path.join(namespace).join(key)
        }
    }

    /// Ensure parent directory exists
    async fn ensure_parent(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn get(&self, namespace: &str, key: &str) -> StorageResult<Bytes> {
        let path = self.key_path(namespace, key);
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(format!("{}/{}", namespace, key))
            } else {
                StorageError::Io(e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn put(&self, namespace: &str, key: &str, data: Bytes) -> StorageResult<()> {
        let path = self.key_path(namespace, key);
        self.ensure_parent(&path).await?;
        fs::write(&path, &data).await?;
        Ok(())
    }

    async fn delete(&self, namespace: &str, key: &str) -> StorageResult<()> {
        let path = self.key_path(namespace, key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()), // Already deleted
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn exists(&self, namespace: &str, key: &str) -> StorageResult<bool> {
        let path = self.key_path(namespace, key);
        Ok(path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn put_get_exists_delete() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        let data = Bytes::from("fake png bytes");
        storage.put("images", "abc123def456", data.clone()).await.unwrap();

        let retrieved = storage.get("images", "abc123def456").await.unwrap();
        assert_eq!(retrieved, data);

        assert!(storage.exists("images", "abc123def456").await.unwrap());
        assert!(!storage.exists("images", "nonexistent").await.unwrap());

        storage.delete("images", "abc123def456").await.unwrap();
        assert!(!storage.exists("images", "abc123def456").await.unwrap());
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        let err = storage.get("images", "missing").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        storage.put("images", "aabbcc", Bytes::from("x")).await.unwrap();
        storage.delete("images", "aabbcc").await.unwrap();
        storage.delete("images", "aabbcc").await.unwrap();
    }

    #[tokio::test]
    async fn short_keys_are_not_sharded() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        storage.put("images", "a", Bytes::from("1")).await.unwrap();
        assert_eq!(storage.get("images", "a").await.unwrap(), Bytes::from("1"));
    }
}
