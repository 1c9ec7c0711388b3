use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A curated video. `tiktok_url` is stored in its resolved, canonical form
/// and `tiktok_id` is always the identifier extracted from it; the two are
/// written together or not at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub tiktok_url: String,
    pub tiktok_id: String,
    pub caption: String,
    pub category_name: String,
    pub category_slug: String,
    pub plays: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Compact display form for play counts: 1_234_567 -> "1.2M", 5_600 -> "5.6K".
#[must_use]
pub fn format_plays(plays: i64) -> String {
    if plays >= 1_000_000 {
        format!("{:.1}M", plays as f64 / 1_000_000.0)
    } else if plays >= 1_000 {
        format!("{:.1}K", plays as f64 / 1_000.0)
    } else {
        plays.to_string()
    }
}
