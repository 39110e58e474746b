//! Image upload and serving endpoints

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use super::AppState;
use crate::db::entities::image;
use crate::error::{FieldError, Result, ServerError};
use crate::repositories::NewImage;
use crate::upload::UploadPolicy;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: Uuid,
    pub file_name: String,
    pub file_extension: String,
    pub file_description: Option<String>,
    pub file_size_in_bytes: i64,
    pub url: String,
}

impl From<image::Model> for ImageDto {
    fn from(m: image::Model) -> Self {
        Self {
            id: m.id,
            file_name: m.file_name,
            file_extension: m.file_extension,
            file_description: m.file_description,
            file_size_in_bytes: m.file_size_in_bytes,
            url: m.url,
        }
    }
}

/// Multipart upload: a `file` part plus optional `fileName` and
/// `fileDescription` text parts. The declared filename on the file part
/// supplies the extension; the size is the byte count actually received.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImageDto>)> {
    let mut content: Option<Bytes> = None;
    let mut declared_name: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut file_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidArgument(e.to_string()))?
    {
        let part = field.name().map(str::to_string);
        match part.as_deref() {
            Some("file") => {
                declared_name = field.file_name().map(str::to_string);
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ServerError::InvalidArgument(e.to_string()))?,
                );
            }
            Some("fileName") => {
                file_name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ServerError::InvalidArgument(e.to_string()))?,
                );
            }
            Some("fileDescription") => {
                file_description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ServerError::InvalidArgument(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (content, declared_name) = match (content, declared_name) {
        (Some(content), Some(name)) => (content, name),
        _ => {
            return Err(ServerError::Validation(vec![FieldError::new(
                "file",
                "A file is required",
            )]))
        }
    };

    let violations = state
        .upload_policy
        .validate(&declared_name, content.len() as u64);
    if !violations.is_empty() {
        return Err(ServerError::Validation(violations));
    }

    let file_extension = UploadPolicy::extension_of(&declared_name).to_string();
    let file_size_in_bytes = content.len() as i64;
    let stored = state
        .images
        .upload(NewImage {
            content,
            file_name: file_name.unwrap_or(declared_name),
            file_extension,
            file_description,
            file_size_in_bytes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// Serve stored image bytes back by id.
pub async fn serve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let Some(img) = state.images.get(id).await? else {
        return Err(ServerError::NotFound("image"));
    };
    let content = state.images.content(&img).await?;
    let content_type = match img.file_extension.to_ascii_lowercase().as_str() {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    };
    Ok(([(header::CONTENT_TYPE, content_type)], content))
}
