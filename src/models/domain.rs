use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered proficiency scale for a skill
///
/// Variants are declared in rank order so the derived `Ord` matches
/// beginner < intermediate < advanced < expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    /// Rank on the 0..=3 scale
    pub fn rank(self) -> u8 {
        match self {
            ProficiencyLevel::Beginner => 0,
            ProficiencyLevel::Intermediate => 1,
            ProficiencyLevel::Advanced => 2,
            ProficiencyLevel::Expert => 3,
        }
    }

    /// The level one step up, or `None` at the top of the scale
    pub fn next(self) -> Option<Self> {
        match self {
            ProficiencyLevel::Beginner => Some(ProficiencyLevel::Intermediate),
            ProficiencyLevel::Intermediate => Some(ProficiencyLevel::Advanced),
            ProficiencyLevel::Advanced => Some(ProficiencyLevel::Expert),
            ProficiencyLevel::Expert => None,
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProficiencyLevel::Beginner => "beginner",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
            ProficiencyLevel::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// A skill a user offers or is looking for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub skill_level: ProficiencyLevel,
    pub is_offering: bool,
    pub user_id: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Public profile fields used for locality checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_state: Option<String>,
}

impl Profile {
    /// Two profiles are local to each other when either their city or their
    /// state matches. Two absent values count as equal.
    pub fn shares_locality(&self, other: &Profile) -> bool {
        self.location_city == other.location_city || self.location_state == other.location_state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Proposed,
    Active,
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Proposed
    }
}

/// Community project looking for volunteers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free text, not normalized against skill names
    #[serde(default, deserialize_with = "nullable_vec")]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub estimated_credits: i64,
    pub creator_id: String,
    #[serde(default)]
    pub status: ProjectStatus,
}

/// PostgREST returns `null` for empty array columns
fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A scored candidate skill together with its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub skill: Skill,
    pub profile: Profile,
    pub match_score: u8,
    pub same_location: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    CategoryMatch,
    SkillProgression,
}

/// A skill suggested to learn next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub skill: Skill,
    pub reason: String,
    pub relevance_score: u8,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
}

/// Ranked output of an orchestrator run
#[derive(Debug, Clone)]
pub struct RankedMatches<T> {
    pub matches: Vec<T>,
    /// Size of the candidate pool before scoring
    pub total_candidates: usize,
    /// Candidates skipped because they could not be scored consistently
    pub discarded: usize,
}

/// Scoring weights for the pairwise match score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Multiplier applied to name similarity
    pub similarity: f64,
    /// Similarity must exceed this before it contributes
    pub similarity_threshold: f64,
    pub category: f64,
    /// Requester level at or above the candidate level
    pub level_covered: f64,
    /// Requester level exactly one below the candidate level
    pub level_stretch: f64,
    pub location: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: 40.0,
            similarity_threshold: 0.3,
            category: 20.0,
            level_covered: 15.0,
            level_stretch: 10.0,
            location: 15.0,
        }
    }
}

/// Minimum scores and result caps for each ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingLimits {
    pub peer_min_score: u8,
    pub peer_limit: usize,
    pub recommendation_min_score: u8,
    pub recommendation_limit: usize,
    pub project_min_score: u8,
    pub project_limit: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            peer_min_score: 40,
            peer_limit: 20,
            recommendation_min_score: 30,
            recommendation_limit: 10,
            project_min_score: 40,
            project_limit: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(city: Option<&str>, state: Option<&str>) -> Profile {
        Profile {
            id: "p".to_string(),
            full_name: "P".to_string(),
            location_city: city.map(str::to_string),
            location_state: state.map(str::to_string),
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(ProficiencyLevel::Beginner < ProficiencyLevel::Expert);
        assert_eq!(ProficiencyLevel::Advanced.rank(), 2);
        assert_eq!(ProficiencyLevel::Advanced.next(), Some(ProficiencyLevel::Expert));
        assert_eq!(ProficiencyLevel::Expert.next(), None);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let raw = r#"{"id":"s1","name":"Go","category":"Technology","skill_level":"guru","is_offering":true,"user_id":"u1"}"#;
        assert!(serde_json::from_str::<Skill>(raw).is_err());
    }

    #[test]
    fn test_locality_city_or_state() {
        let a = profile(Some("Austin"), Some("TX"));
        assert!(a.shares_locality(&profile(Some("Austin"), Some("CA"))));
        assert!(a.shares_locality(&profile(Some("Dallas"), Some("TX"))));
        assert!(!a.shares_locality(&profile(Some("Denver"), Some("CO"))));
    }

    #[test]
    fn test_locality_missing_values_match_each_other() {
        let a = profile(None, None);
        assert!(a.shares_locality(&profile(None, None)));
        assert!(a.shares_locality(&profile(Some("Austin"), None)));
        assert!(!a.shares_locality(&profile(Some("Austin"), Some("TX"))));
    }

    #[test]
    fn test_project_null_required_skills() {
        let raw = r#"{"id":"pr1","title":"Garden","creator_id":"u1","required_skills":null,"status":"active"}"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert!(project.required_skills.is_empty());
        assert_eq!(project.status, ProjectStatus::Active);
    }

    #[test]
    fn test_recommendation_type_tag() {
        let json = serde_json::to_value(RecommendationType::SkillProgression).unwrap();
        assert_eq!(json, "skill_progression");
    }
}
