use thiserror::Error;

/// Errors surfaced by the matching pipeline
#[derive(Debug, Error)]
pub enum MatchError {
    /// A required request field is missing or empty
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Record store error: {0}")]
    Store(#[from] crate::services::SupabaseError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl MatchError {
    pub fn missing(field: &str) -> Self {
        MatchError::Validation(format!("{} is required", field))
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
