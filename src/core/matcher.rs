use std::collections::HashMap;

use crate::core::{
    scoring::{calculate_match_score, to_bounded_score},
    similarity::skill_similarity,
};
use crate::error::{MatchError, Result};
use crate::models::{MatchResult, Profile, Project, RankedMatches, RankingLimits, ScoringWeights, Skill};

/// Weight of each required-skill similarity in project matching
pub const PROJECT_SIMILARITY_WEIGHT: f64 = 60.0;

/// Main ranking orchestrator
///
/// Every ranking follows the same pipeline:
/// 1. Candidate generation
/// 2. Pairwise scoring
/// 3. Threshold filtering
/// 4. Stable descending sort and truncation
///
/// The matcher is stateless: results depend only on the arguments of each
/// call, and caller collections are never reordered.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    weights: ScoringWeights,
    limits: RankingLimits,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, limits: RankingLimits) -> Self {
        Self { weights, limits }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn limits(&self) -> &RankingLimits {
        &self.limits
    }

    /// Rank peers whose skills complement the requester's
    ///
    /// # Arguments
    /// * `requester` - Profile of the user asking for matches
    /// * `requester_skills` - The requester's own skills
    /// * `candidates` - Candidate skills to score
    /// * `owners` - Prefetched owner profiles keyed by profile id
    ///
    /// Candidates whose owner is missing from `owners` are discarded.
    pub fn find_peer_matches(
        &self,
        requester: &Profile,
        requester_skills: &[Skill],
        candidates: &[Skill],
        owners: &HashMap<String, Profile>,
    ) -> Result<RankedMatches<MatchResult>> {
        if requester.id.trim().is_empty() {
            return Err(MatchError::missing("user_id"));
        }

        let mut discarded = 0;
        let mut scored = Vec::new();

        for candidate in candidates {
            let Some(owner) = owners.get(&candidate.user_id) else {
                tracing::warn!(
                    "Discarding skill {}: owner profile {} not found",
                    candidate.id,
                    candidate.user_id
                );
                discarded += 1;
                continue;
            };

            let same_location = requester.shares_locality(owner);
            let match_score =
                calculate_match_score(requester_skills, candidate, same_location, &self.weights);

            if match_score > self.limits.peer_min_score {
                scored.push(MatchResult {
                    skill: candidate.clone(),
                    profile: owner.clone(),
                    match_score,
                    same_location,
                });
            }
        }

        let matches = rank_by(scored, |m| m.match_score, self.limits.peer_limit);

        tracing::debug!(
            "Peer matching for {}: {} of {} candidates kept ({} discarded)",
            requester.id,
            matches.len(),
            candidates.len(),
            discarded
        );

        Ok(RankedMatches {
            matches,
            total_candidates: candidates.len(),
            discarded,
        })
    }

    /// Rank offered skills against a project's required skills
    ///
    /// Required-skill similarities are summed uncapped, the locality bonus is
    /// added, and only then is the total capped at 100. Skills that are not
    /// offered are ignored.
    pub fn match_project(
        &self,
        project: &Project,
        project_owner: Option<&Profile>,
        candidates: &[Skill],
        owners: &HashMap<String, Profile>,
    ) -> Result<RankedMatches<MatchResult>> {
        if project.id.trim().is_empty() {
            return Err(MatchError::missing("project_id"));
        }
        if let Some(owner) = project_owner.filter(|p| p.id != project.creator_id) {
            return Err(MatchError::InvalidRecord(format!(
                "profile {} given as owner of project {} created by {}",
                owner.id, project.id, project.creator_id
            )));
        }

        let mut discarded = 0;
        let mut scored = Vec::new();

        for candidate in candidates.iter().filter(|s| s.is_offering) {
            let Some(owner) = owners.get(&candidate.user_id) else {
                tracing::warn!(
                    "Discarding skill {}: owner profile {} not found",
                    candidate.id,
                    candidate.user_id
                );
                discarded += 1;
                continue;
            };

            let same_location = project_owner.is_some_and(|p| p.shares_locality(owner));
            let match_score = self.project_score(project, candidate, same_location);

            if match_score > self.limits.project_min_score {
                scored.push(MatchResult {
                    skill: candidate.clone(),
                    profile: owner.clone(),
                    match_score,
                    same_location,
                });
            }
        }

        let matches = rank_by(scored, |m| m.match_score, self.limits.project_limit);

        tracing::debug!(
            "Project matching for {}: {} of {} candidates kept ({} discarded)",
            project.id,
            matches.len(),
            candidates.len(),
            discarded
        );

        Ok(RankedMatches {
            matches,
            total_candidates: candidates.len(),
            discarded,
        })
    }

    /// Score one candidate skill against a project
    pub fn project_score(&self, project: &Project, candidate: &Skill, same_location: bool) -> u8 {
        let mut score: f64 = project
            .required_skills
            .iter()
            .map(|required| skill_similarity(&candidate.name, required) * PROJECT_SIMILARITY_WEIGHT)
            .sum();

        if same_location {
            score += self.weights.location;
        }

        to_bounded_score(score)
    }
}

/// Stable descending sort by `key`, truncated to `limit`
///
/// Ties keep their input order.
pub(crate) fn rank_by<T, F>(mut items: Vec<T>, key: F, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> u8,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items.truncate(limit);
    items
}
