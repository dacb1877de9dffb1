// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod recommend;
pub mod scoring;
pub mod similarity;

pub use filters::{complement_offering_flag, complement_pool, known_skill_names, owner_ids};
pub use matcher::{Matcher, PROJECT_SIMILARITY_WEIGHT};
pub use recommend::category_relevance;
pub use scoring::{calculate_match_score, to_bounded_score};
pub use similarity::skill_similarity;
