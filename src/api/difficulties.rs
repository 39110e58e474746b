//! Difficulty endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use super::AppState;
use crate::db::entities::difficulty;
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDto {
    pub id: Uuid,
    pub name: String,
}

impl From<difficulty::Model> for DifficultyDto {
    fn from(m: difficulty::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DifficultyDto>>> {
    let difficulties = state.difficulties.list().await?;
    Ok(Json(
        difficulties.into_iter().map(DifficultyDto::from).collect(),
    ))
}
