use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::session::{Claims, SessionVerdict};
use crate::server::AppState;

/// Extractor gating privileged handlers on a valid admin credential.
pub struct RequireAdmin(pub Claims);

/// Uniform rejection. Missing, malformed, forged, and expired credentials
/// all produce the same response; the distinction is logged, not served.
pub struct AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({ "data": null, "error": "Unauthorized" });

        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response.headers_mut().insert(
            "WWW-Authenticate",
            "Bearer realm=\"clipdeck\"".parse().unwrap(),
        );

        response
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError)?;

        match state.sessions.validate(token) {
            SessionVerdict::Valid(claims) => Ok(RequireAdmin(claims)),
            SessionVerdict::Invalid(reason) => {
                tracing::debug!(?reason, "rejected admin credential");
                Err(AuthError)
            }
        }
    }
}
