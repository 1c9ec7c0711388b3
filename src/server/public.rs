use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
};

use super::dto::{ListVideosParams, LoginRequest, LoginResponse};
use super::response::{ApiError, ApiResponse, StoreResultExt};
use crate::error::Error;
use crate::server::AppState;

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/videos", get(list_videos))
        .route("/categories", get(list_categories))
}

/// Issues an admin session credential. The only endpoint that reports a
/// password-specific failure; everything behind the gate stays uniform.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let token = match state.sessions.issue(&req.password).await {
        Ok(token) => token,
        Err(Error::InvalidPassword) => return Err(ApiError::unauthorized("Invalid password")),
        Err(_) => return Err(ApiError::internal("Failed to issue session token")),
    };

    Ok(Json(ApiResponse::success(LoginResponse { token })))
}

async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListVideosParams>,
) -> impl IntoResponse {
    let category = params.category.as_deref().filter(|s| !s.is_empty());
    let videos = state
        .read_store
        .list_videos(category)
        .api_err("Failed to list videos")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(videos)))
}

async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let categories = state
        .read_store
        .list_categories()
        .api_err("Failed to list categories")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(categories)))
}
