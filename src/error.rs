use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid start date '{0}' (expected YYYY-MM-DD)")]
    InvalidStartDate(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;
