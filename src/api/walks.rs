//! Walk endpoints

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::difficulties::DifficultyDto;
use super::regions::RegionDto;
use super::AppState;
use crate::db::entities::walk;
use crate::error::{FieldError, Result, ServerError};
use crate::query::ListParams;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
    pub region: Option<RegionDto>,
    pub difficulty: Option<DifficultyDto>,
}

impl WalkDto {
    fn new(
        walk: walk::Model,
        region: Option<RegionDto>,
        difficulty: Option<DifficultyDto>,
    ) -> Self {
        Self {
            id: walk.id,
            name: walk.name,
            description: walk.description,
            length_in_km: walk.length_in_km,
            region_id: walk.region_id,
            difficulty_id: walk.difficulty_id,
            region,
            difficulty,
        }
    }
}

/// Listing parameters, straight off the query string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkListQuery {
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
    pub sort_by: Option<String>,
    pub is_ascending: Option<bool>,
    #[serde(default = "default_page_number")]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_number() -> u64 {
    1
}

fn default_page_size() -> u64 {
    1000
}

impl From<WalkListQuery> for ListParams {
    fn from(q: WalkListQuery) -> Self {
        Self {
            filter_on: q.filter_on,
            filter_query: q.filter_query,
            sort_by: q.sort_by,
            is_ascending: q.is_ascending.unwrap_or(true),
            page_number: q.page_number,
            page_size: q.page_size,
        }
    }
}

/// Request body for create and update; the id comes from the route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkRequest {
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

impl WalkRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        } else if self.name.chars().count() > 100 {
            errors.push(FieldError::new("name", "Name has to be a maximum of 100 characters"));
        }
        if self.description.is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        } else if self.description.chars().count() > 1000 {
            errors.push(FieldError::new(
                "description",
                "Description has to be a maximum of 1000 characters",
            ));
        }
        if !(self.length_in_km > 0.0) {
            errors.push(FieldError::new("lengthInKm", "Length has to be greater than zero"));
        }
        errors
    }

    fn into_model(self) -> walk::Model {
        walk::Model {
            id: Uuid::nil(),
            name: self.name,
            description: self.description,
            length_in_km: self.length_in_km,
            region_id: self.region_id,
            difficulty_id: self.difficulty_id,
        }
    }
}

/// Validate field constraints and resolve both foreign keys, accumulating
/// every violation into one response. Returns the walk model together with
/// the referenced region and difficulty so handlers can build the nested DTO
/// without a second round of lookups.
async fn check_walk_request(
    state: &AppState,
    request: WalkRequest,
) -> Result<(walk::Model, RegionDto, DifficultyDto)> {
    let mut errors = request.validate();

    let region = state.regions.get(request.region_id).await?;
    if region.is_none() {
        errors.push(FieldError::new("regionId", "Region does not exist"));
    }
    let difficulty = state.difficulties.get(request.difficulty_id).await?;
    if difficulty.is_none() {
        errors.push(FieldError::new("difficultyId", "Difficulty does not exist"));
    }

    if !errors.is_empty() {
        return Err(ServerError::Validation(errors));
    }

    match (region, difficulty) {
        (Some(region), Some(difficulty)) => {
            Ok((request.into_model(), region.into(), difficulty.into()))
        }
        // Unreachable: a missing reference was recorded in `errors` above
        _ => Err(ServerError::NotFound("walk reference")),
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WalkListQuery>,
) -> Result<Json<Vec<WalkDto>>> {
    let params = ListParams::from(query);
    tracing::debug!(?params, "listing walks");
    let walks = state.walks.list(&params).await?;

    // The referenced collections are tiny; join in memory instead of a
    // lookup per walk.
    let regions: HashMap<Uuid, RegionDto> = state
        .regions
        .list()
        .await?
        .into_iter()
        .map(|r| (r.id, RegionDto::from(r)))
        .collect();
    let difficulties: HashMap<Uuid, DifficultyDto> = state
        .difficulties
        .list()
        .await?
        .into_iter()
        .map(|d| (d.id, DifficultyDto::from(d)))
        .collect();

    let dtos = walks
        .into_iter()
        .map(|w| {
            let region = regions.get(&w.region_id).cloned();
            let difficulty = difficulties.get(&w.difficulty_id).cloned();
            WalkDto::new(w, region, difficulty)
        })
        .collect();
    Ok(Json(dtos))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WalkDto>> {
    let Some(walk) = state.walks.get(id).await? else {
        return Err(ServerError::NotFound("walk"));
    };
    Ok(Json(assemble(&state, walk).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WalkRequest>,
) -> Result<(StatusCode, Json<WalkDto>)> {
    let (model, region, difficulty) = check_walk_request(&state, request).await?;
    let created = state.walks.create(model).await?;
    tracing::info!(id = %created.id, "created walk");
    Ok((
        StatusCode::CREATED,
        Json(WalkDto::new(created, Some(region), Some(difficulty))),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<WalkRequest>,
) -> Result<Json<WalkDto>> {
    let (model, region, difficulty) = check_walk_request(&state, request).await?;
    match state.walks.update(id, model).await? {
        Some(updated) => Ok(Json(WalkDto::new(updated, Some(region), Some(difficulty)))),
        None => Err(ServerError::NotFound("walk")),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WalkDto>> {
    match state.walks.delete(id).await? {
        Some(deleted) => {
            tracing::info!(id = %id, "deleted walk");
            Ok(Json(assemble(&state, deleted).await?))
        }
        None => Err(ServerError::NotFound("walk")),
    }
}

/// Attach the referenced region and difficulty to a walk for the response.
async fn assemble(state: &AppState, walk: walk::Model) -> Result<WalkDto> {
    let region = state.regions.get(walk.region_id).await?.map(RegionDto::from);
    let difficulty = state
        .difficulties
        .get(walk.difficulty_id)
        .await?
        .map(DifficultyDto::from);
    Ok(WalkDto::new(walk, region, difficulty))
}
