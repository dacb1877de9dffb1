use crate::core::{
    filters::known_skill_names,
    matcher::{rank_by, Matcher},
    scoring::to_bounded_score,
    similarity::skill_similarity,
};
use crate::error::{MatchError, Result};
use crate::models::{RankedMatches, RecommendationResult, RecommendationType, Skill};

/// Per requester skill sharing the candidate's category
const CATEGORY_RELEVANCE: f64 = 30.0;
const SIMILARITY_RELEVANCE: f64 = 40.0;
/// Fixed relevance of a next-level offering of a skill the requester has
const PROGRESSION_RELEVANCE: u8 = 90;

impl Matcher {
    /// Recommend skills for the requester to learn next
    ///
    /// Two strategies are merged before ranking:
    /// - category match: offered skills in the requester's categories that
    ///   they don't have yet
    /// - level progression: offered skills with the same name one level above
    ///   a requester skill
    pub fn recommend_skills(
        &self,
        requester_id: &str,
        requester_skills: &[Skill],
        pool: &[Skill],
    ) -> Result<RankedMatches<RecommendationResult>> {
        if requester_id.trim().is_empty() {
            return Err(MatchError::missing("user_id"));
        }

        let offered: Vec<&Skill> = pool
            .iter()
            .filter(|s| s.is_offering && s.user_id != requester_id)
            .collect();

        let mut recommendations = self.category_matches(requester_skills, &offered);
        let by_category = recommendations.len();
        recommendations.extend(level_progressions(requester_skills, &offered));

        tracing::debug!(
            "Recommendations for {}: {} category, {} progression from {} candidates",
            requester_id,
            by_category,
            recommendations.len() - by_category,
            pool.len()
        );

        let matches = rank_by(
            recommendations,
            |r| r.relevance_score,
            self.limits().recommendation_limit,
        );

        Ok(RankedMatches {
            matches,
            total_candidates: pool.len(),
            discarded: 0,
        })
    }

    fn category_matches(&self, requester_skills: &[Skill], offered: &[&Skill]) -> Vec<RecommendationResult> {
        let known = known_skill_names(requester_skills);

        let mut categories: Vec<&str> = Vec::new();
        for skill in requester_skills {
            if !categories.contains(&skill.category.as_str()) {
                categories.push(&skill.category);
            }
        }

        let mut results = Vec::new();
        for category in categories {
            for candidate in offered.iter().filter(|s| s.category == category) {
                if known.contains(&candidate.name.to_lowercase()) {
                    continue;
                }

                let relevance = category_relevance(requester_skills, candidate);
                if relevance > f64::from(self.limits().recommendation_min_score) {
                    results.push(RecommendationResult {
                        skill: (*candidate).clone(),
                        reason: "Related to your existing skills".to_string(),
                        relevance_score: to_bounded_score(relevance),
                        kind: RecommendationType::CategoryMatch,
                    });
                }
            }
        }

        results
    }
}

/// Unrounded relevance (0-100) of a candidate to the requester's skills
///
/// Every requester skill contributes its name similarity, and those sharing
/// the candidate's category add a flat bonus on top.
pub fn category_relevance(requester_skills: &[Skill], candidate: &Skill) -> f64 {
    let score: f64 = requester_skills
        .iter()
        .map(|s| {
            let category = if s.category == candidate.category {
                CATEGORY_RELEVANCE
            } else {
                0.0
            };
            category + skill_similarity(&s.name, &candidate.name) * SIMILARITY_RELEVANCE
        })
        .sum();

    score.min(100.0)
}

fn level_progressions(requester_skills: &[Skill], offered: &[&Skill]) -> Vec<RecommendationResult> {
    let mut results = Vec::new();

    for own in requester_skills {
        let Some(next_level) = own.skill_level.next() else {
            continue;
        };
        let name = own.name.to_lowercase();

        for candidate in offered {
            if candidate.skill_level == next_level && candidate.name.to_lowercase() == name {
                results.push(RecommendationResult {
                    skill: (*candidate).clone(),
                    reason: format!("Level up your {} skills", own.name),
                    relevance_score: PROGRESSION_RELEVANCE,
                    kind: RecommendationType::SkillProgression,
                });
            }
        }
    }

    results
}
