//! Region repository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::db::entities::{region, walk};
use crate::error::Result;

#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// List every stored region
    async fn list(&self) -> Result<Vec<region::Model>>;

    /// Get a region by id; `None` when absent
    async fn get(&self, id: Uuid) -> Result<Option<region::Model>>;

    /// Persist a new region; a nil id is replaced with a fresh one.
    /// Returns the stored value so callers can discover the assigned id.
    async fn create(&self, new_region: region::Model) -> Result<region::Model>;

    /// Overwrite the mutable fields of an existing region
    async fn update(&self, id: Uuid, changes: region::Model) -> Result<Option<region::Model>>;

    /// Remove a region, returning it as it was immediately before removal
    async fn delete(&self, id: Uuid) -> Result<Option<region::Model>>;

    /// Whether any walk still references this region
    async fn has_walks(&self, id: Uuid) -> Result<bool>;
}

pub struct SqlRegionRepository {
    db: DatabaseConnection,
}

impl SqlRegionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegionRepository for SqlRegionRepository {
    async fn list(&self) -> Result<Vec<region::Model>> {
        Ok(region::Entity::find().all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<region::Model>> {
        Ok(region::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, new_region: region::Model) -> Result<region::Model> {
        let id = if new_region.id.is_nil() {
            Uuid::new_v4()
        } else {
            new_region.id
        };
        let stored = region::ActiveModel {
            id: Set(id),
            name: Set(new_region.name),
            code: Set(new_region.code),
            region_image_url: Set(new_region.region_image_url),
        }
        .insert(&self.db)
        .await?;
        Ok(stored)
    }

    async fn update(&self, id: Uuid, changes: region::Model) -> Result<Option<region::Model>> {
        let Some(existing) = region::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: region::ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.code = Set(changes.code);
        active.region_image_url = Set(changes.region_image_url);
        Ok(Some(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<region::Model>> {
        let Some(existing) = region::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        region::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(existing))
    }

    async fn has_walks(&self, id: Uuid) -> Result<bool> {
        let count = walk::Entity::find()
            .filter(walk::Column::RegionId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn repo() -> SqlRegionRepository {
        let db = db::connect("sqlite::memory:").await.unwrap();
        SqlRegionRepository::new(db)
    }

    fn fiordland() -> region::Model {
        region::Model {
            id: Uuid::nil(),
            name: "Fiordland".to_string(),
            code: "FIO".to_string(),
            region_image_url: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_an_id_and_round_trips() {
        let repo = repo().await;

        let created = repo.create(fiordland()).await.unwrap();
        assert!(!created.id.is_nil());

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_keeps_a_caller_supplied_id() {
        let repo = repo().await;
        let id = Uuid::new_v4();
        let created = repo
            .create(region::Model {
                id,
                ..fiordland()
            })
            .await
            .unwrap();
        assert_eq!(created.id, id);
    }

    #[tokio::test]
    async fn list_includes_seed_regions() {
        let repo = repo().await;
        assert_eq!(repo.list().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn update_overwrites_mutable_fields() {
        let repo = repo().await;
        let created = repo.create(fiordland()).await.unwrap();

        let updated = repo
            .update(
                created.id,
                region::Model {
                    id: Uuid::nil(), // ignored; identity comes from the path
                    name: "Fiordland National Park".to_string(),
                    code: "FNP".to_string(),
                    region_image_url: Some("fiordland.jpg".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Fiordland National Park");
        assert_eq!(repo.get(created.id).await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_missing_region_is_none() {
        let repo = repo().await;
        let result = repo.update(Uuid::new_v4(), fiordland()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_returns_the_entity_once() {
        let repo = repo().await;
        let created = repo.create(fiordland()).await.unwrap();

        let deleted = repo.delete(created.id).await.unwrap().unwrap();
        assert_eq!(deleted, created);

        assert!(repo.delete(created.id).await.unwrap().is_none());
        assert!(repo.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn has_walks_is_false_without_references() {
        let repo = repo().await;
        let created = repo.create(fiordland()).await.unwrap();
        assert!(!repo.has_walks(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn has_walks_is_true_while_a_walk_references_the_region() {
        use crate::db::entities::walk;
        use crate::repositories::{SqlWalkRepository, WalkRepository};
        use uuid::uuid;

        let db = db::connect("sqlite::memory:").await.unwrap();
        let regions = SqlRegionRepository::new(db.clone());
        let walks = SqlWalkRepository::new(db);

        let region = regions.create(fiordland()).await.unwrap();
        let walk = walks
            .create(walk::Model {
                id: Uuid::nil(),
                name: "Kepler Track".to_string(),
                description: "Alpine loop".to_string(),
                length_in_km: 60.0,
                region_id: region.id,
                difficulty_id: uuid!("160f690c-deed-4c13-bbd5-f78ae581c6a3"),
            })
            .await
            .unwrap();
        assert!(regions.has_walks(region.id).await.unwrap());

        // The reference going away clears the flag
        walks.delete(walk.id).await.unwrap();
        assert!(!regions.has_walks(region.id).await.unwrap());
    }
}
