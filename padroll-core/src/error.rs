use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by tick handlers. They are caught at the tick boundary.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("track {0} not found")]
    TrackNotFound(usize),
    #[error("binding store: {0}")]
    Store(#[from] StoreError),
}
