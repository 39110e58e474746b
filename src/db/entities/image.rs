//! Image metadata entity
//!
//! File bytes live in the storage backend, keyed by `id`; this row only
//! carries the descriptive metadata and the URL the bytes are served from.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub file_name: String,
    pub file_extension: String,
    pub file_description: Option<String>,
    pub file_size_in_bytes: i64,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
