use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

use crate::core::{complement_offering_flag, owner_ids, Matcher};
use crate::error::{MatchError, Result};
use crate::models::{
    ApiResponse, FindMatchesRequest, HealthResponse, MatchProjectRequest, Profile,
    ProjectMatchesResponse, RecommendationsRequest,
};
use crate::services::{CacheKey, RecordCache, SupabaseClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    /// `None` when record caching is disabled
    pub cache: Option<Arc<RecordCache>>,
    pub matcher: Matcher,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/ai-skill-matching/find-matches", web::post().to(find_matches))
        .route("/ai-skill-matching/recommendations", web::post().to(recommendations))
        .route("/ai-skill-matching/match-project", web::post().to(match_project));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_records: state.cache.as_ref().map(|c| c.stats().entries),
        timestamp: chrono::Utc::now(),
    })
}

/// Find peer matches endpoint
///
/// POST /api/v1/ai-skill-matching/find-matches
///
/// Request body:
/// ```json
/// {
///   "user_id": "string",
///   "skill_ids": ["string"]
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse> {
    let span = tracing::info_span!("find_matches", request_id = %uuid::Uuid::new_v4());
    run_find_matches(&state, req.into_inner()).instrument(span).await
}

async fn run_find_matches(state: &AppState, req: FindMatchesRequest) -> Result<HttpResponse> {
    validate(&req)?;
    let user_id = req.user_id.as_str();

    tracing::info!("Finding matches for user: {}", user_id);

    let requester = require_profile(state, user_id).await?;
    let requester_skills = state.supabase.get_user_skills(user_id).await?;

    let candidates = if req.skill_ids.is_empty() {
        let wanted = complement_offering_flag(&requester_skills);
        state.supabase.get_complement_skills(user_id, wanted).await?
    } else {
        state.supabase.get_skills_by_ids(&req.skill_ids).await?
    };

    let owners = prefetch_profiles(state, &owner_ids(&candidates)).await?;

    let result = state
        .matcher
        .find_peer_matches(&requester, &requester_skills, &candidates, &owners)?;

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates, {} discarded)",
        result.matches.len(),
        user_id,
        result.total_candidates,
        result.discarded
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(result.matches)))
}

/// Learning recommendations endpoint
///
/// POST /api/v1/ai-skill-matching/recommendations
///
/// Request body:
/// ```json
/// { "user_id": "string" }
/// ```
async fn recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> Result<HttpResponse> {
    let span = tracing::info_span!("recommendations", request_id = %uuid::Uuid::new_v4());
    run_recommendations(&state, req.into_inner()).instrument(span).await
}

async fn run_recommendations(state: &AppState, req: RecommendationsRequest) -> Result<HttpResponse> {
    validate(&req)?;
    let user_id = req.user_id.as_str();

    tracing::info!("Building recommendations for user: {}", user_id);

    require_profile(state, user_id).await?;
    let requester_skills = state.supabase.get_user_skills(user_id).await?;
    let pool = state.supabase.get_other_users_skills(user_id).await?;

    let result = state.matcher.recommend_skills(user_id, &requester_skills, &pool)?;

    tracing::info!(
        "Returning {} recommendations for user {} (from {} candidates)",
        result.matches.len(),
        user_id,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(result.matches)))
}

/// Project volunteer matching endpoint
///
/// POST /api/v1/ai-skill-matching/match-project
///
/// Request body:
/// ```json
/// { "project_id": "string" }
/// ```
async fn match_project(
    state: web::Data<AppState>,
    req: web::Json<MatchProjectRequest>,
) -> Result<HttpResponse> {
    let span = tracing::info_span!("match_project", request_id = %uuid::Uuid::new_v4());
    run_match_project(&state, req.into_inner()).instrument(span).await
}

async fn run_match_project(state: &AppState, req: MatchProjectRequest) -> Result<HttpResponse> {
    validate(&req)?;
    let project_id = req.project_id.as_str();

    tracing::info!("Matching volunteers for project: {}", project_id);

    let project = state
        .supabase
        .get_project(project_id)
        .await?
        .ok_or_else(|| MatchError::NotFound("Project not found".to_string()))?;

    let candidates = state.supabase.get_offering_skills().await?;

    // project owner rides along with the candidate owners in one batch
    let mut ids = owner_ids(&candidates);
    if !ids.contains(&project.creator_id) {
        ids.push(project.creator_id.clone());
    }
    let owners = prefetch_profiles(state, &ids).await?;

    let result = state.matcher.match_project(
        &project,
        owners.get(&project.creator_id),
        &candidates,
        &owners,
    )?;

    tracing::info!(
        "Returning {} volunteers for project {} (from {} candidates, {} discarded)",
        result.matches.len(),
        project_id,
        result.total_candidates,
        result.discarded
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProjectMatchesResponse {
        project,
        matched_skills: result.matches,
    })))
}

fn validate<T: Validate>(req: &T) -> Result<()> {
    req.validate().map_err(|errors| {
        tracing::info!("Validation failed: {}", errors);
        MatchError::Validation(errors.to_string())
    })
}

async fn require_profile(state: &AppState, user_id: &str) -> Result<Profile> {
    state
        .supabase
        .get_profile(user_id)
        .await?
        .ok_or_else(|| MatchError::NotFound(format!("Profile not found for user {}", user_id)))
}

/// Batch-prefetch owner profiles, serving what we can from the record cache
async fn prefetch_profiles(state: &AppState, ids: &[String]) -> Result<HashMap<String, Profile>> {
    let Some(cache) = &state.cache else {
        return Ok(state.supabase.get_profiles(ids).await?);
    };

    let mut profiles = HashMap::with_capacity(ids.len());
    let mut missing = Vec::new();

    for id in ids {
        match cache.get::<Profile>(&CacheKey::profile(id)).await {
            Ok(profile) => {
                profiles.insert(id.clone(), profile);
            }
            Err(_) => missing.push(id.clone()),
        }
    }

    tracing::debug!("{} profiles cached, {} to fetch", profiles.len(), missing.len());

    let fetched = state.supabase.get_profiles(&missing).await?;
    for (id, profile) in fetched {
        if let Err(e) = cache.set(&CacheKey::profile(&id), &profile).await {
            tracing::warn!("Failed to cache profile {}: {}", id, e);
        }
        profiles.insert(id, profile);
    }

    Ok(profiles)
}
