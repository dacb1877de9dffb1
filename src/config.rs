use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::{RankingLimits, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_role_key: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: None,
            ttl_secs: None,
        }
    }
}

fn default_true() -> bool { true }

/// Thresholds and result caps of the three rankings
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_peer_min_score")]
    pub peer_min_score: u8,
    #[serde(default = "default_peer_limit")]
    pub peer_limit: usize,
    #[serde(default = "default_recommendation_min_score")]
    pub recommendation_min_score: u8,
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
    #[serde(default = "default_project_min_score")]
    pub project_min_score: u8,
    #[serde(default = "default_project_limit")]
    pub project_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            peer_min_score: default_peer_min_score(),
            peer_limit: default_peer_limit(),
            recommendation_min_score: default_recommendation_min_score(),
            recommendation_limit: default_recommendation_limit(),
            project_min_score: default_project_min_score(),
            project_limit: default_project_limit(),
        }
    }
}

fn default_peer_min_score() -> u8 { 40 }
fn default_peer_limit() -> usize { 20 }
fn default_recommendation_min_score() -> u8 { 30 }
fn default_recommendation_limit() -> usize { 10 }
fn default_project_min_score() -> u8 { 40 }
fn default_project_limit() -> usize { 15 }

impl From<&MatchingSettings> for RankingLimits {
    fn from(s: &MatchingSettings) -> Self {
        Self {
            peer_min_score: s.peer_min_score,
            peer_limit: s.peer_limit,
            recommendation_min_score: s.recommendation_min_score,
            recommendation_limit: s.recommendation_limit,
            project_min_score: s.project_min_score,
            project_limit: s.project_limit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_similarity_weight")]
    pub similarity: f64,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_level_covered_weight")]
    pub level_covered: f64,
    #[serde(default = "default_level_stretch_weight")]
    pub level_stretch: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            similarity: default_similarity_weight(),
            similarity_threshold: default_similarity_threshold(),
            category: default_category_weight(),
            level_covered: default_level_covered_weight(),
            level_stretch: default_level_stretch_weight(),
            location: default_location_weight(),
        }
    }
}

fn default_similarity_weight() -> f64 { 40.0 }
fn default_similarity_threshold() -> f64 { 0.3 }
fn default_category_weight() -> f64 { 20.0 }
fn default_level_covered_weight() -> f64 { 15.0 }
fn default_level_stretch_weight() -> f64 { 10.0 }
fn default_location_weight() -> f64 { 15.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        Self {
            similarity: w.similarity,
            similarity_threshold: w.similarity_threshold,
            category: w.category,
            level_covered: w.level_covered,
            level_stretch: w.level_stretch,
            location: w.location,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLSWAP__)
    /// 5. SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLSWAP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SKILLSWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_supabase_env(settings)?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    pub fn ranking_limits(&self) -> RankingLimits {
        RankingLimits::from(&self.matching)
    }
}

/// Apply the conventional Supabase environment variables on top of the
/// loaded configuration
fn apply_supabase_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("SUPABASE_URL") {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Ok(key) = env::var("SUPABASE_SERVICE_ROLE_KEY") {
        builder = builder.set_override("supabase.service_role_key", key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_weights_match_scorer() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_limits_match_rankings() {
        let limits = RankingLimits::from(&MatchingSettings::default());
        assert_eq!(limits, RankingLimits::default());
    }

    #[test]
    fn test_minimal_toml() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [supabase]
                url = "https://project.supabase.test"
                service_role_key = "key"

                [matching]
                peer_limit = 5
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.matching.peer_limit, 5);
        assert_eq!(settings.matching.peer_min_score, 40);
        assert!(settings.cache.enabled);
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }
}
