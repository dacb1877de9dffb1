//! SkillSwap Match - skill matching and recommendation service
//!
//! This library provides the scoring engine behind the SkillSwap platform's
//! peer matching, "skills to learn next" recommendations and project
//! volunteer matching, plus the thin HTTP layer that feeds it store records.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, skill_similarity, Matcher};
pub use error::MatchError;
pub use models::{MatchResult, Profile, ProficiencyLevel, Project, RecommendationResult, Skill};
