mod models;

pub use models::{Category, Video, format_plays};
