use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::schema::SCHEMA;
use super::{AdminStore, ReadStore};
use crate::error::{Error, Result};
use crate::types::{Category, Video};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// UNIQUE violations are recoverable conflicts, not storage failures.
fn constraint_to_conflict(e: rusqlite::Error) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::AlreadyExists
        }
        _ => Error::Database(e),
    }
}

fn video_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Video> {
    Ok(Video {
        id: row.get(0)?,
        tiktok_url: row.get(1)?,
        tiktok_id: row.get(2)?,
        caption: row.get(3)?,
        category_name: row.get(4)?,
        category_slug: row.get(5)?,
        plays: row.get(6)?,
        notes: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
        updated_at: parse_datetime(&row.get::<_, String>(9)?),
    })
}

fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

const VIDEO_COLUMNS: &str =
    "id, tiktok_url, tiktok_id, caption, category_name, category_slug, plays, notes, created_at, updated_at";

impl ReadStore for SqliteStore {
    fn list_videos(&self, category_slug: Option<&str>) -> Result<Vec<Video>> {
        let conn = self.conn();

        let videos = match category_slug {
            Some(slug) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {VIDEO_COLUMNS} FROM videos
                     WHERE category_slug = ?1 ORDER BY created_at DESC"
                ))?;
                let rows = stmt.query_map(params![slug], video_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {VIDEO_COLUMNS} FROM videos ORDER BY created_at DESC"
                ))?;
                let rows = stmt.query_map([], video_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        Ok(videos)
    }

    fn get_video(&self, id: &str) -> Result<Option<Video>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = ?1"),
            params![id],
            video_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, name, slug, created_at FROM categories ORDER BY name")?;

        let rows = stmt.query_map([], category_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, slug, created_at FROM categories WHERE name = ?1",
            params![name],
            category_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, slug, created_at FROM categories WHERE slug = ?1",
            params![slug],
            category_from_row,
        )
        .optional()
        .map_err(Error::from)
    }
}

impl AdminStore for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn create_video(&self, video: &Video) -> Result<()> {
        self.conn().execute(
            "INSERT INTO videos (id, tiktok_url, tiktok_id, caption, category_name, category_slug, plays, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                video.id,
                video.tiktok_url,
                video.tiktok_id,
                video.caption,
                video.category_name,
                video.category_slug,
                video.plays,
                video.notes,
                format_datetime(&video.created_at),
                format_datetime(&video.updated_at),
            ],
        )?;
        Ok(())
    }

    fn update_video(&self, video: &Video) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE videos SET tiktok_url = ?1, tiktok_id = ?2, caption = ?3,
                 category_name = ?4, category_slug = ?5, plays = ?6, notes = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                video.tiktok_url,
                video.tiktok_id,
                video.caption,
                video.category_name,
                video.category_slug,
                video.plays,
                video.notes,
                format_datetime(&video.updated_at),
                video.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_video(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM videos WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn create_category(&self, category: &Category) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO categories (id, name, slug, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    category.id,
                    category.name,
                    category.slug,
                    format_datetime(&category.created_at),
                ],
            )
            .map_err(constraint_to_conflict)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use uuid::Uuid;

    fn open_store(dir: &tempfile::TempDir) -> SqliteStore {
        let store = SqliteStore::new(dir.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    fn category(name: &str, slug: &str) -> Category {
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        }
    }

    fn video(tiktok_id: &str, category_slug: &str, created_at: DateTime<Utc>) -> Video {
        Video {
            id: Uuid::new_v4().to_string(),
            tiktok_url: format!("https://www.tiktok.com/@user/video/{tiktok_id}"),
            tiktok_id: tiktok_id.to_string(),
            caption: String::new(),
            category_name: category_slug.to_string(),
            category_slug: category_slug.to_string(),
            plays: 0,
            notes: String::new(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_video_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        let v = video("7123456789012345678", "surfing", Utc::now());
        store.create_video(&v).unwrap();

        let fetched = store.get_video(&v.id).unwrap().unwrap();
        assert_eq!(fetched.tiktok_id, "7123456789012345678");
        assert_eq!(fetched.tiktok_url, v.tiktok_url);
        assert_eq!(fetched.plays, 0);
    }

    #[test]
    fn test_list_videos_newest_first() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        let now = Utc::now();
        let older = video("111", "surfing", now - Duration::hours(2));
        let newer = video("222", "surfing", now);
        store.create_video(&older).unwrap();
        store.create_video(&newer).unwrap();

        let listed = store.list_videos(None).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].tiktok_id, "222");
        assert_eq!(listed[1].tiktok_id, "111");
    }

    #[test]
    fn test_list_videos_filtered_by_category() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        store.create_video(&video("111", "surfing", Utc::now())).unwrap();
        store.create_video(&video("222", "skating", Utc::now())).unwrap();

        let surfing = store.list_videos(Some("surfing")).unwrap();
        assert_eq!(surfing.len(), 1);
        assert_eq!(surfing[0].tiktok_id, "111");

        assert!(store.list_videos(Some("climbing")).unwrap().is_empty());
    }

    #[test]
    fn test_update_video() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut v = video("111", "surfing", Utc::now());
        store.create_video(&v).unwrap();

        v.caption = "big wave".to_string();
        v.plays = 42;
        store.update_video(&v).unwrap();

        let fetched = store.get_video(&v.id).unwrap().unwrap();
        assert_eq!(fetched.caption, "big wave");
        assert_eq!(fetched.plays, 42);
    }

    #[test]
    fn test_update_missing_video_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        let v = video("111", "surfing", Utc::now());
        assert!(matches!(store.update_video(&v), Err(Error::NotFound)));
    }

    #[test]
    fn test_delete_video() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        let v = video("111", "surfing", Utc::now());
        store.create_video(&v).unwrap();

        assert!(store.delete_video(&v.id).unwrap());
        assert!(!store.delete_video(&v.id).unwrap());
        assert!(store.get_video(&v.id).unwrap().is_none());
    }

    #[test]
    fn test_categories_listed_by_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        store.create_category(&category("Surfing", "surfing")).unwrap();
        store.create_category(&category("Bouldering", "bouldering")).unwrap();

        let listed = store.list_categories().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Bouldering");
        assert_eq!(listed[1].name, "Surfing");
    }

    #[test]
    fn test_duplicate_category_name_is_conflict() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        store
            .create_category(&category("Beach Volleyball", "beach-volleyball"))
            .unwrap();
        let result = store.create_category(&category("Beach Volleyball", "beach-volleyball-2"));

        assert!(matches!(result, Err(Error::AlreadyExists)));
    }

    #[test]
    fn test_duplicate_category_slug_is_conflict() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        store
            .create_category(&category("Beach Volleyball", "beach-volleyball"))
            .unwrap();
        // Different display name, same derived slug.
        let result = store.create_category(&category("beach  volleyball", "beach-volleyball"));

        assert!(matches!(result, Err(Error::AlreadyExists)));
    }

    #[test]
    fn test_category_lookups() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);

        store.create_category(&category("Surfing", "surfing")).unwrap();

        assert!(store.get_category_by_name("Surfing").unwrap().is_some());
        assert!(store.get_category_by_slug("surfing").unwrap().is_some());
        assert!(store.get_category_by_name("surfing").unwrap().is_none());
        assert!(store.get_category_by_slug("skating").unwrap().is_none());
    }
}
