mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::{Category, Video};

/// Read-only catalog access. This is the only store handle public handlers
/// ever hold.
pub trait ReadStore: Send + Sync {
    fn list_videos(&self, category_slug: Option<&str>) -> Result<Vec<Video>>;
    fn get_video(&self, id: &str) -> Result<Option<Video>>;

    fn list_categories(&self) -> Result<Vec<Category>>;
    fn get_category_by_name(&self, name: &str) -> Result<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
}

/// Full catalog access, handed out only to handlers that sit behind the
/// session gate.
pub trait AdminStore: ReadStore {
    fn initialize(&self) -> Result<()>;

    fn create_video(&self, video: &Video) -> Result<()>;
    fn update_video(&self, video: &Video) -> Result<()>;
    fn delete_video(&self, id: &str) -> Result<bool>;

    fn create_category(&self, category: &Category) -> Result<()>;
}
