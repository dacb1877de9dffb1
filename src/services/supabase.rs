use crate::models::{Profile, Project, Skill};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the Supabase REST API
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid service role key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the hosted store
const PROFILES: &str = "profiles";
const SKILLS: &str = "skills";
const PROJECTS: &str = "community_projects";

/// Most ids sent in a single `in.(...)` filter, keeps request URLs short
pub const MAX_IDS_PER_QUERY: usize = 100;

/// Supabase (PostgREST) client
///
/// Read-only access to the records the matching engine needs:
/// - profiles, fetched one at a time or in batches for owner prefetching
/// - skills, filtered by owner, id or offering flag
/// - community projects
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, service_key: String, timeout: Duration) -> Result<Self, SupabaseError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            service_key,
            client,
        })
    }

    /// Fetch a single profile, `None` when it doesn't exist
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, SupabaseError> {
        let rows: Vec<Profile> = self.select(PROFILES, &[("id", eq(user_id))]).await?;
        Ok(rows.into_iter().next())
    }

    /// Fetch many profiles keyed by profile id, at most `MAX_IDS_PER_QUERY` per request
    ///
    /// Ids without a matching row are simply absent from the map.
    pub async fn get_profiles(&self, ids: &[String]) -> Result<HashMap<String, Profile>, SupabaseError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut profiles = HashMap::with_capacity(ids.len());
        for batch in ids.chunks(MAX_IDS_PER_QUERY) {
            let rows: Vec<Profile> = self.select(PROFILES, &[("id", in_list(batch))]).await?;
            profiles.extend(rows.into_iter().map(|p| (p.id.clone(), p)));
        }

        tracing::debug!("Prefetched {} of {} profiles", profiles.len(), ids.len());

        Ok(profiles)
    }

    /// All skills owned by a user
    pub async fn get_user_skills(&self, user_id: &str) -> Result<Vec<Skill>, SupabaseError> {
        self.select(SKILLS, &[("user_id", eq(user_id))]).await
    }

    /// Skills by id, used when the caller names the candidate pool
    pub async fn get_skills_by_ids(&self, ids: &[String]) -> Result<Vec<Skill>, SupabaseError> {
        let mut skills = Vec::with_capacity(ids.len());
        for batch in ids.chunks(MAX_IDS_PER_QUERY) {
            let rows: Vec<Skill> = self.select(SKILLS, &[("id", in_list(batch))]).await?;
            skills.extend(rows);
        }
        Ok(skills)
    }

    /// Skills of other users on the given side of the exchange
    pub async fn get_complement_skills(
        &self,
        user_id: &str,
        is_offering: bool,
    ) -> Result<Vec<Skill>, SupabaseError> {
        self.select(
            SKILLS,
            &[
                ("user_id", format!("neq.{}", user_id)),
                ("is_offering", format!("eq.{}", is_offering)),
            ],
        )
        .await
    }

    /// Every offered skill
    pub async fn get_offering_skills(&self) -> Result<Vec<Skill>, SupabaseError> {
        self.select(SKILLS, &[("is_offering", "eq.true".to_string())]).await
    }

    /// Every skill not owned by the user
    pub async fn get_other_users_skills(&self, user_id: &str) -> Result<Vec<Skill>, SupabaseError> {
        self.select(SKILLS, &[("user_id", format!("neq.{}", user_id))]).await
    }

    /// Fetch a single project, `None` when it doesn't exist
    pub async fn get_project(&self, project_id: &str) -> Result<Option<Project>, SupabaseError> {
        let rows: Vec<Project> = self.select(PROJECTS, &[("id", eq(project_id))]).await?;
        Ok(rows.into_iter().next())
    }

    /// Run a PostgREST select with the given column filters
    async fn select<T>(&self, table: &str, filters: &[(&str, String)]) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let mut url = format!(
            "{}/rest/v1/{}?select=*",
            self.base_url.trim_end_matches('/'),
            table
        );
        for (column, filter) in filters {
            url.push('&');
            url.push_str(column);
            url.push('=');
            url.push_str(&urlencoding::encode(filter));
        }

        tracing::debug!("Querying {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Query on {} failed: {} - {}", table, status, body);
            return Err(SupabaseError::ApiError(format!("Failed to query {}: {}", table, status)));
        }

        let json: Value = response.json().await?;
        let rows = match json {
            Value::Array(rows) => rows,
            _ => {
                return Err(SupabaseError::InvalidResponse(format!(
                    "Expected an array of {} rows",
                    table
                )))
            }
        };

        Ok(decode_rows(table, rows))
    }
}

/// Decode store rows one by one, discarding rows that don't fit the model
///
/// A single malformed row (for example an unknown proficiency level) must
/// not fail the whole request.
pub fn decode_rows<T>(table: &str, rows: Vec<Value>) -> Vec<T>
where
    T: DeserializeOwned,
{
    let total = rows.len();

    let decoded: Vec<T> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Discarding malformed {} row: {}", table, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!("Discarded {} of {} {} rows", total - decoded.len(), total, table);
    }

    decoded
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

/// PostgREST `in` filter with every value double-quoted, so reserved
/// characters like `,` and `)` stay inside the value
fn in_list(values: &[String]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}
