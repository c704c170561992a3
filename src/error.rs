use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("contract source not found: {0}")]
    SourceNotFound(String),

    #[error("contract source unreadable: {path}: {reason}")]
    SourceUnreadable { path: String, reason: String },

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuardError>;
