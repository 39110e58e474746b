use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// A single field-level constraint violation, reported to the client
/// alongside every other violation found in the same request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("region is referenced by existing walks")]
    RegionInUse,

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Serialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            ServerError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response()
            }
            ServerError::InvalidArgument(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ServerError::RegionInUse => (StatusCode::CONFLICT, self.to_string()).into_response(),
            ServerError::Db(e) => {
                tracing::error!("database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            ServerError::Storage(e) => {
                tracing::error!("storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
