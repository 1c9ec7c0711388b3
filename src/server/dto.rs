use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub tiktok_url: String,
    pub category_name: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub plays: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateVideoRequest {
    /// When present, the URL is re-resolved and the id re-extracted before
    /// anything is written.
    #[serde(default)]
    pub tiktok_url: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub plays: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListVideosParams {
    #[serde(default)]
    pub category: Option<String>,
}
