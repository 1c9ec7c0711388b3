use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid password")]
    InvalidPassword,

    #[error("could not extract a video id from the url")]
    ExtractionFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
