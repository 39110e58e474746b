//! Image repository
//!
//! Bytes go to the storage backend, metadata goes to the database. The byte
//! write happens first and there is no transactional wrapping: a failure
//! between the two writes leaves an orphaned blob, never a metadata row
//! pointing at nothing. Last write wins on racing keys.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::db::entities::image;
use crate::error::Result;
use crate::storage::{namespaces, StorageBackend};

/// A validated upload, ready to persist.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub content: Bytes,
    pub file_name: String,
    pub file_extension: String,
    pub file_description: Option<String>,
    pub file_size_in_bytes: i64,
}

#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Persist bytes and metadata, returning the stored record with its
    /// assigned id and fetchable URL
    async fn upload(&self, new_image: NewImage) -> Result<image::Model>;

    async fn get(&self, id: Uuid) -> Result<Option<image::Model>>;

    /// Fetch the stored bytes for an image record
    async fn content(&self, img: &image::Model) -> Result<Bytes>;
}

pub struct SqlImageRepository {
    db: DatabaseConnection,
    storage: Arc<dyn StorageBackend>,
}

impl SqlImageRepository {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageBackend>) -> Self {
        Self { db, storage }
    }

    fn storage_key(id: Uuid) -> String {
        id.simple().to_string()
    }
}

#[async_trait]
impl ImageRepository for SqlImageRepository {
    async fn upload(&self, new_image: NewImage) -> Result<image::Model> {
        let id = Uuid::new_v4();

        self.storage
            .put(namespaces::IMAGES, &Self::storage_key(id), new_image.content)
            .await?;

        let stored = image::ActiveModel {
            id: Set(id),
            file_name: Set(new_image.file_name),
            file_extension: Set(new_image.file_extension),
            file_description: Set(new_image.file_description),
            file_size_in_bytes: Set(new_image.file_size_in_bytes),
            url: Set(format!("/images/{id}")),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(id = %stored.id, size = stored.file_size_in_bytes, "stored image");
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> Result<Option<image::Model>> {
        Ok(image::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn content(&self, img: &image::Model) -> Result<Bytes> {
        Ok(self
            .storage
            .get(namespaces::IMAGES, &Self::storage_key(img.id))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    async fn repo(temp_dir: &TempDir) -> SqlImageRepository {
        let db = db::connect("sqlite::memory:").await.unwrap();
        let storage = Arc::new(LocalStorage::new(temp_dir.path().to_path_buf()));
        SqlImageRepository::new(db, storage)
    }

    fn png(size: usize) -> NewImage {
        NewImage {
            content: Bytes::from(vec![0u8; size]),
            file_name: "summit".to_string(),
            file_extension: ".png".to_string(),
            file_description: Some("view from the summit".to_string()),
            file_size_in_bytes: size as i64,
        }
    }

    #[tokio::test]
    async fn upload_stores_bytes_and_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir).await;

        let stored = repo.upload(png(5 * 1024 * 1024)).await.unwrap();
        assert_eq!(stored.file_size_in_bytes, 5_242_880);
        assert_eq!(stored.file_extension, ".png");
        assert_eq!(stored.url, format!("/images/{}", stored.id));

        let fetched = repo.get(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);

        let content = repo.content(&stored).await.unwrap();
        assert_eq!(content.len(), 5_242_880);
    }

    #[tokio::test]
    async fn get_of_unknown_image_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir).await;
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
