//! Walk repository
//!
//! Listing goes through the generic query engine: the whole collection is
//! materialized, then filtered/sorted/paginated in memory. The collection is
//! small (a country's worth of walking tracks) and this keeps the permissive
//! unrecognized-token policy deterministic instead of depending on SQL
//! dialect behaviour.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::db::entities::walk;
use crate::error::Result;
use crate::query::{self, ListParams, Listable, SortKey};

impl Listable for walk::Model {
    fn filter_field(token: &str) -> Option<fn(&Self) -> &str> {
        if token.eq_ignore_ascii_case("name") {
            Some(|w| &w.name)
        } else {
            None
        }
    }

    fn sort_field(token: &str) -> Option<SortKey<Self>> {
        if token.eq_ignore_ascii_case("name") {
            Some(SortKey::Text(|w| &w.name))
        } else if token.eq_ignore_ascii_case("lengthinkm") {
            Some(SortKey::Number(|w| w.length_in_km))
        } else {
            None
        }
    }
}

#[async_trait]
pub trait WalkRepository: Send + Sync {
    /// List walks, applying the given filter/sort/page parameters
    async fn list(&self, params: &ListParams) -> Result<Vec<walk::Model>>;

    async fn get(&self, id: Uuid) -> Result<Option<walk::Model>>;

    /// Persist a new walk; a nil id is replaced with a fresh one
    async fn create(&self, new_walk: walk::Model) -> Result<walk::Model>;

    /// Overwrite the mutable fields of an existing walk
    async fn update(&self, id: Uuid, changes: walk::Model) -> Result<Option<walk::Model>>;

    async fn delete(&self, id: Uuid) -> Result<Option<walk::Model>>;
}

pub struct SqlWalkRepository {
    db: DatabaseConnection,
}

impl SqlWalkRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WalkRepository for SqlWalkRepository {
    async fn list(&self, params: &ListParams) -> Result<Vec<walk::Model>> {
        let walks = walk::Entity::find().all(&self.db).await?;
        query::apply(walks, params)
    }

    async fn get(&self, id: Uuid) -> Result<Option<walk::Model>> {
        Ok(walk::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, new_walk: walk::Model) -> Result<walk::Model> {
        let id = if new_walk.id.is_nil() {
            Uuid::new_v4()
        } else {
            new_walk.id
        };
        let stored = walk::ActiveModel {
            id: Set(id),
            name: Set(new_walk.name),
            description: Set(new_walk.description),
            length_in_km: Set(new_walk.length_in_km),
            region_id: Set(new_walk.region_id),
            difficulty_id: Set(new_walk.difficulty_id),
        }
        .insert(&self.db)
        .await?;
        Ok(stored)
    }

    async fn update(&self, id: Uuid, changes: walk::Model) -> Result<Option<walk::Model>> {
        let Some(existing) = walk::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: walk::ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.description = Set(changes.description);
        active.length_in_km = Set(changes.length_in_km);
        active.region_id = Set(changes.region_id);
        active.difficulty_id = Set(changes.difficulty_id);
        Ok(Some(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<walk::Model>> {
        let Some(existing) = walk::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        walk::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(Some(existing))
    }
}
