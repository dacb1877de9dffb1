use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Project};

/// Uniform response envelope for every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Payload of the project matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMatchesResponse {
    pub project: Project,
    pub matched_skills: Vec<MatchResult>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Entries in the record cache, absent when caching is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_records: Option<u64>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
