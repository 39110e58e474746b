//! Difficulty repository
//!
//! The vocabulary is seeded at startup and read-only over the API, so the
//! contract stops at list and get.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::db::entities::difficulty;
use crate::error::Result;

#[async_trait]
pub trait DifficultyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<difficulty::Model>>;

    async fn get(&self, id: Uuid) -> Result<Option<difficulty::Model>>;
}

pub struct SqlDifficultyRepository {
    db: DatabaseConnection,
}

impl SqlDifficultyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DifficultyRepository for SqlDifficultyRepository {
    async fn list(&self) -> Result<Vec<difficulty::Model>> {
        Ok(difficulty::Entity::find().all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<difficulty::Model>> {
        Ok(difficulty::Entity::find_by_id(id).one(&self.db).await?)
    }
}
