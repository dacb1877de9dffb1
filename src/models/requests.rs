use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Request to find peers for a user's skills
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    #[serde(default, alias = "userId", deserialize_with = "trimmed")]
    pub user_id: String,
    /// Explicit candidate pool; when empty the complement pool is used
    #[serde(default, alias = "skillIds")]
    pub skill_ids: Vec<String>,
}

/// Request for skills to learn next
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    #[serde(default, alias = "userId", deserialize_with = "trimmed")]
    pub user_id: String,
}

/// Request to find volunteers for a project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchProjectRequest {
    #[validate(length(min = 1, message = "project_id is required"))]
    #[serde(default, alias = "projectId", deserialize_with = "trimmed")]
    pub project_id: String,
}

/// Identifiers are trimmed so that a blank id fails the length check
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}
