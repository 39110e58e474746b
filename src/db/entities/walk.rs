//! Walk entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "walks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id"
    )]
    Region,
    #[sea_orm(
        belongs_to = "super::difficulty::Entity",
        from = "Column::DifficultyId",
        to = "super::difficulty::Column::Id"
    )]
    Difficulty,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::difficulty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Difficulty.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
