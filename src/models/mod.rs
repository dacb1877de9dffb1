// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    MatchResult, Profile, ProficiencyLevel, Project, ProjectStatus, RankedMatches, RankingLimits,
    RecommendationResult, RecommendationType, ScoringWeights, Skill,
};
pub use requests::{FindMatchesRequest, MatchProjectRequest, RecommendationsRequest};
pub use responses::{ApiResponse, HealthResponse, ProjectMatchesResponse};
