//! HTTP transport layer: routes, shared state, and request/response DTOs.
//!
//! Handlers translate wire requests into repository calls and repository
//! results back into wire shapes. Field validation happens here, before any
//! repository is touched, and accumulates every violation.

pub mod difficulties;
pub mod images;
pub mod regions;
pub mod walks;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;

use crate::repositories::{
    DifficultyRepository, ImageRepository, RegionRepository, SqlDifficultyRepository,
    SqlImageRepository, SqlRegionRepository, SqlWalkRepository, WalkRepository,
};
use crate::storage::StorageBackend;
use crate::upload::UploadPolicy;

/// Application state shared across handlers
pub struct AppState {
    pub regions: Arc<dyn RegionRepository>,
    pub difficulties: Arc<dyn DifficultyRepository>,
    pub walks: Arc<dyn WalkRepository>,
    pub images: Arc<dyn ImageRepository>,
    pub upload_policy: UploadPolicy,
}

impl AppState {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            regions: Arc::new(SqlRegionRepository::new(db.clone())),
            difficulties: Arc::new(SqlDifficultyRepository::new(db.clone())),
            walks: Arc::new(SqlWalkRepository::new(db.clone())),
            images: Arc::new(SqlImageRepository::new(db, storage)),
            upload_policy: UploadPolicy::default(),
        }
    }
}

/// Build the API router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/regions", get(regions::list).post(regions::create))
        .route(
            "/api/regions/:id",
            get(regions::get_by_id)
                .put(regions::update)
                .delete(regions::delete),
        )
        .route("/api/walks", get(walks::list).post(walks::create))
        .route(
            "/api/walks/:id",
            get(walks::get_by_id).put(walks::update).delete(walks::delete),
        )
        .route("/api/difficulties", get(difficulties::list))
        .route("/api/images/upload", post(images::upload))
        .route("/images/:id", get(images::serve))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
