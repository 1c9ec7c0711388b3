use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, patch, post},
};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{CreateCategoryRequest, CreateVideoRequest, UpdateVideoRequest};
use super::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use super::validation::{validate_category_name, validate_plays};
use crate::auth::RequireAdmin;
use crate::error::Error;
use crate::resolver::{EXTRACTION_GUIDANCE, slugify};
use crate::server::AppState;
use crate::types::{Category, Video};

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/videos", post(create_video))
        .route("/videos/{id}", patch(update_video))
        .route("/videos/{id}", delete(delete_video))
        .route("/categories", post(create_category))
}

pub async fn create_category(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    let name = req.name.trim().to_string();
    validate_category_name(&name)?;

    let slug = slugify(&name);
    if slug.is_empty() {
        return Err(ApiError::bad_request(
            "Category name must contain at least one letter or number",
        ));
    }

    let exists = state
        .admin_store
        .get_category_by_name(&name)
        .api_err("Failed to check category")?
        .is_some()
        || state
            .admin_store
            .get_category_by_slug(&slug)
            .api_err("Failed to check category")?
            .is_some();
    if exists {
        return Err(ApiError::conflict(
            "A category with that name already exists",
        ));
    }

    let category = Category {
        id: Uuid::new_v4().to_string(),
        name,
        slug,
        created_at: Utc::now(),
    };

    match state.admin_store.create_category(&category) {
        Ok(()) => Ok((StatusCode::CREATED, Json(ApiResponse::success(category)))),
        Err(Error::AlreadyExists) => Err(ApiError::conflict(
            "A category with that name already exists",
        )),
        Err(_) => Err(ApiError::internal("Failed to create category")),
    }
}

pub async fn create_video(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateVideoRequest>,
) -> impl IntoResponse {
    let raw_url = req.tiktok_url.trim();
    if raw_url.is_empty() {
        return Err(ApiError::bad_request("Video URL is required"));
    }

    let category_name = req.category_name.trim().to_string();
    validate_category_name(&category_name)?;

    let plays = req.plays.unwrap_or(0);
    validate_plays(plays)?;

    let resolved = state
        .resolver
        .normalize(raw_url)
        .await
        .map_err(|_| ApiError::bad_request(EXTRACTION_GUIDANCE))?;

    let now = Utc::now();
    let video = Video {
        id: Uuid::new_v4().to_string(),
        tiktok_url: resolved.url,
        tiktok_id: resolved.tiktok_id,
        caption: req.caption.unwrap_or_default(),
        category_slug: slugify(&category_name),
        category_name,
        plays,
        notes: req.notes.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    state
        .admin_store
        .create_video(&video)
        .api_err("Failed to create video")?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(video))))
}

pub async fn update_video(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVideoRequest>,
) -> impl IntoResponse {
    let mut video = state
        .admin_store
        .get_video(&id)
        .api_err("Failed to get video")?
        .or_not_found("Video not found")?;

    if let Some(url) = req.tiktok_url {
        let resolved = state
            .resolver
            .normalize(url.trim())
            .await
            .map_err(|_| ApiError::bad_request(EXTRACTION_GUIDANCE))?;
        video.tiktok_url = resolved.url;
        video.tiktok_id = resolved.tiktok_id;
    }
    if let Some(category_name) = req.category_name {
        let category_name = category_name.trim().to_string();
        validate_category_name(&category_name)?;
        video.category_slug = slugify(&category_name);
        video.category_name = category_name;
    }
    if let Some(caption) = req.caption {
        video.caption = caption;
    }
    if let Some(plays) = req.plays {
        validate_plays(plays)?;
        video.plays = plays;
    }
    if let Some(notes) = req.notes {
        video.notes = notes;
    }
    video.updated_at = Utc::now();

    state
        .admin_store
        .update_video(&video)
        .api_err("Failed to update video")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(video)))
}

pub async fn delete_video(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let deleted = state
        .admin_store
        .delete_video(&id)
        .api_err("Failed to delete video")?;

    if !deleted {
        return Err(ApiError::not_found("Video not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
