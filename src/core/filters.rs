use crate::models::Skill;
use std::collections::HashSet;

/// Offering flag the peer pool should carry for this requester
///
/// The requester's first skill is treated as their primary one; peers are
/// sought on the opposite side of the exchange. A requester without skills
/// is treated as seeking, so offered skills are returned.
#[inline]
pub fn complement_offering_flag(requester_skills: &[Skill]) -> bool {
    !requester_skills.first().map(|s| s.is_offering).unwrap_or(false)
}

/// Default peer pool: skills owned by other users on the opposite side of the
/// requester's primary skill
pub fn complement_pool(requester_id: &str, requester_skills: &[Skill], pool: &[Skill]) -> Vec<Skill> {
    let wanted = complement_offering_flag(requester_skills);

    pool.iter()
        .filter(|skill| skill.user_id != requester_id && skill.is_offering == wanted)
        .cloned()
        .collect()
}

/// Distinct owner ids of a candidate pool, in first-seen order
///
/// Used to batch-prefetch owner profiles in a single store query.
pub fn owner_ids(skills: &[Skill]) -> Vec<String> {
    let mut seen = HashSet::new();

    skills
        .iter()
        .filter(|skill| seen.insert(skill.user_id.as_str()))
        .map(|skill| skill.user_id.clone())
        .collect()
}

/// Lowercased names of the skills a requester already has
pub fn known_skill_names(skills: &[Skill]) -> HashSet<String> {
    skills.iter().map(|s| s.name.to_lowercase()).collect()
}
