use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::Matcher;
use crate::error::MatchError;
use crate::models::{AdmissionPolicy, ScoringWeights};

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Used when a request carries no limit
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    /// Candidates fetched per requested match
    #[serde(default = "default_pool_multiplier")]
    pub pool_multiplier: usize,
    #[serde(default = "default_true")]
    pub city_prefilter: bool,
    #[serde(default)]
    pub admission: AdmissionPolicy,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            pool_multiplier: default_pool_multiplier(),
            city_prefilter: default_true(),
            admission: AdmissionPolicy::default(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_pool_multiplier() -> usize { 5 }
fn default_true() -> bool { true }

/// Factor weights keyed by factor name, e.g. `city = 3`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: BTreeMap<String, u32>,
}

impl ScoringSettings {
    pub fn scoring_weights(&self) -> Result<ScoringWeights, MatchError> {
        ScoringWeights::from_map(&self.weights)
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
    /// 4. Environment variables (prefixed with WANAS__), `.env` included
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., WANAS__SCORING__WEIGHTS__CITY -> scoring.weights.city
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Build a matcher from the configured weights and admission policy
    pub fn matcher(&self) -> Result<Matcher, MatchError> {
        let weights = self.scoring.scoring_weights()?;
        Ok(Matcher::new(weights).with_admission(self.matching.admission))
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("WANAS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
