//! Region endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use crate::db::entities::region;
use crate::error::{FieldError, Result, ServerError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub region_image_url: Option<String>,
}

impl From<region::Model> for RegionDto {
    fn from(m: region::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            code: m.code,
            region_image_url: m.region_image_url,
        }
    }
}

/// Request body for create and update; the id comes from the route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRequest {
    pub name: String,
    pub code: String,
    pub region_image_url: Option<String>,
}

impl RegionRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        } else if self.name.chars().count() > 100 {
            errors.push(FieldError::new("name", "Name has to be a maximum of 100 characters"));
        }
        if self.code.is_empty() {
            errors.push(FieldError::new("code", "Code is required"));
        } else if self.code.chars().count() > 3 {
            errors.push(FieldError::new("code", "Code has to be a maximum of 3 characters"));
        }
        errors
    }

    fn into_model(self) -> region::Model {
        region::Model {
            id: Uuid::nil(),
            name: self.name,
            code: self.code,
            region_image_url: self.region_image_url,
        }
    }

    fn checked(self) -> Result<region::Model> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self.into_model())
        } else {
            Err(ServerError::Validation(errors))
        }
    }
}

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<RegionDto>>> {
    tracing::debug!("listing regions");
    let regions = state.regions.list().await?;
    Ok(Json(regions.into_iter().map(RegionDto::from).collect()))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegionDto>> {
    match state.regions.get(id).await? {
        Some(r) => Ok(Json(r.into())),
        None => Err(ServerError::NotFound("region")),
    }
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegionRequest>,
) -> Result<(StatusCode, Json<RegionDto>)> {
    let created = state.regions.create(request.checked()?).await?;
    tracing::info!(id = %created.id, "created region");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<RegionRequest>,
) -> Result<Json<RegionDto>> {
    match state.regions.update(id, request.checked()?).await? {
        Some(r) => Ok(Json(r.into())),
        None => Err(ServerError::NotFound("region")),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegionDto>> {
    // Walks hold a foreign key into regions; deleting out from under them
    // is rejected rather than cascaded.
    if state.regions.has_walks(id).await? {
        return Err(ServerError::RegionInUse);
    }
    match state.regions.delete(id).await? {
        Some(r) => {
            tracing::info!(id = %id, "deleted region");
            Ok(Json(r.into()))
        }
        None => Err(ServerError::NotFound("region")),
    }
}
