use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Rate Limit: {0}")]
    RateLimit(String),

    #[error("Object `{0}` not found")]
    ObjectNotFound(String),
    #[error("Unknown item type: {0}")]
    UnknownItemType(String),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Database pool error: {0}")]
    PoolError(#[from] diesel::r2d2::PoolError),

    #[error("Cannot encode/decode JSON: {0}")]
    JSONError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
