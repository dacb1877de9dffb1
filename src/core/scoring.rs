use crate::core::similarity::skill_similarity;
use crate::models::{ScoringWeights, Skill};

/// Upper bound of every score
pub const MAX_SCORE: f64 = 100.0;

/// Calculate a match score (0-100) for a candidate skill against the
/// requester's skills
///
/// Per requester skill:
/// - name similarity * 40, when similarity > 0.3
/// - +20 when the categories are identical (case-sensitive)
/// - +15 when the requester's level covers the candidate's, or +10 when it
///   is exactly one level below
///
/// Then +15 once for a shared locality. The total is capped at 100 and
/// rounded.
pub fn calculate_match_score(
    requester_skills: &[Skill],
    candidate: &Skill,
    same_location: bool,
    weights: &ScoringWeights,
) -> u8 {
    let mut score = 0.0;

    for skill in requester_skills {
        let similarity = skill_similarity(&skill.name, &candidate.name);
        if similarity > weights.similarity_threshold {
            score += similarity * weights.similarity;
        }

        if skill.category == candidate.category {
            score += weights.category;
        }

        score += level_bonus(skill, candidate, weights);
    }

    if same_location {
        score += weights.location;
    }

    to_bounded_score(score)
}

#[inline]
fn level_bonus(skill: &Skill, candidate: &Skill, weights: &ScoringWeights) -> f64 {
    let own = skill.skill_level.rank();
    let target = candidate.skill_level.rank();

    if own >= target {
        weights.level_covered
    } else if own + 1 == target {
        weights.level_stretch
    } else {
        0.0
    }
}

/// Cap at 100 and round to the nearest integer
#[inline]
pub fn to_bounded_score(raw: f64) -> u8 {
    raw.clamp(0.0, MAX_SCORE).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProficiencyLevel;

    fn skill(name: &str, category: &str, level: ProficiencyLevel) -> Skill {
        Skill {
            id: format!("{}-id", name),
            name: name.to_string(),
            category: category.to_string(),
            skill_level: level,
            is_offering: true,
            user_id: "owner".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_empty_requester_only_location() {
        let candidate = skill("Python", "Technology", ProficiencyLevel::Beginner);
        let weights = ScoringWeights::default();

        assert_eq!(calculate_match_score(&[], &candidate, false, &weights), 0);
        assert_eq!(calculate_match_score(&[], &candidate, true, &weights), 15);
    }

    #[test]
    fn test_partial_name_same_category() {
        let requester = vec![skill("Python Programming", "Technology", ProficiencyLevel::Advanced)];
        let candidate = skill("Python", "Technology", ProficiencyLevel::Beginner);

        let score = calculate_match_score(&requester, &candidate, false, &ScoringWeights::default());
        assert_eq!(score, 55);
    }

    #[test]
    fn test_one_level_below_same_location() {
        let requester = vec![skill("Guitar", "Music", ProficiencyLevel::Intermediate)];
        let candidate = skill("Guitar", "Arts", ProficiencyLevel::Advanced);

        let score = calculate_match_score(&requester, &candidate, true, &ScoringWeights::default());
        assert_eq!(score, 65);
    }

    #[test]
    fn test_two_levels_below_no_level_bonus() {
        let requester = vec![skill("Guitar", "Music", ProficiencyLevel::Beginner)];
        let candidate = skill("Guitar", "Music", ProficiencyLevel::Advanced);

        let score = calculate_match_score(&requester, &candidate, false, &ScoringWeights::default());
        assert_eq!(score, 60);
    }

    #[test]
    fn test_low_similarity_ignored() {
        // no shared words and no shared bigrams
        let requester = vec![skill("painting", "Arts", ProficiencyLevel::Beginner)];
        let candidate = skill("pottery", "Crafts", ProficiencyLevel::Expert);

        let score = calculate_match_score(&requester, &candidate, false, &ScoringWeights::default());
        assert_eq!(score, 0);
    }

    #[test]
    fn test_score_capped_at_100() {
        let requester: Vec<Skill> = (0..5)
            .map(|_| skill("Rust", "Technology", ProficiencyLevel::Expert))
            .collect();
        let candidate = skill("Rust", "Technology", ProficiencyLevel::Expert);

        let score = calculate_match_score(&requester, &candidate, true, &ScoringWeights::default());
        assert_eq!(score, 100);
    }
}
