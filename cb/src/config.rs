//! Campaignbrief configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::Limits;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plan service connection
    pub api: ApiConfig,

    /// Extraction and hand-off behaviour
    pub engine: EngineConfig,

    /// Where generated plans go
    pub output: OutputConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        let engine = &self.engine;
        if engine.resources_min == 0 {
            return Err(eyre::eyre!("engine.resources-min must be at least 1"));
        }
        if engine.resources_min > engine.resources_max {
            return Err(eyre::eyre!(
                "engine.resources-min ({}) is greater than engine.resources-max ({})",
                engine.resources_min,
                engine.resources_max
            ));
        }
        if self.api.timeout_ms == 0 {
            return Err(eyre::eyre!("api.timeout-ms must be greater than zero"));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(eyre::eyre!("api.base-url must start with http:// or https://"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .campaignbrief.yml
        let local_config = PathBuf::from(".campaignbrief.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/campaignbrief/campaignbrief.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("campaignbrief").join("campaignbrief.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Plan service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the plan generation endpoint
    #[serde(rename = "plan-path")]
    pub plan_path: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Environment variable holding the Basic auth user
    #[serde(rename = "username-env")]
    pub username_env: String,

    /// Environment variable holding the Basic auth password
    #[serde(rename = "password-env")]
    pub password_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            plan_path: "/api/v1/marketing/plan".to_string(),
            timeout_ms: 120_000,
            username_env: "CAMPAIGNBRIEF_USER".to_string(),
            password_env: "CAMPAIGNBRIEF_PASSWORD".to_string(),
        }
    }
}

impl ApiConfig {
    /// Full endpoint URL
    pub fn plan_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.plan_path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Basic auth credentials, when both variables are set
    pub fn credentials(&self) -> Option<(String, String)> {
        let user = std::env::var(&self.username_env).ok()?;
        let password = std::env::var(&self.password_env).ok()?;
        Some((user, password))
    }
}

/// Extraction and hand-off behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest accepted resources-per-week value
    #[serde(rename = "resources-min")]
    pub resources_min: u32,

    /// Highest accepted resources-per-week value
    #[serde(rename = "resources-max")]
    pub resources_max: u32,

    /// Secondary goals kept per draft
    #[serde(rename = "max-secondary-goals")]
    pub max_secondary_goals: usize,

    /// Constraints kept per draft
    #[serde(rename = "max-constraints")]
    pub max_constraints: usize,

    /// Submit as soon as the draft is ready
    #[serde(rename = "auto-submit")]
    pub auto_submit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            resources_min: limits.resources_min,
            resources_max: limits.resources_max,
            max_secondary_goals: limits.max_secondary_goals,
            max_constraints: limits.max_constraints,
            auto_submit: true,
        }
    }
}

impl EngineConfig {
    pub fn limits(&self) -> Limits {
        Limits {
            resources_min: self.resources_min,
            resources_max: self.resources_max,
            max_secondary_goals: self.max_secondary_goals,
            max_constraints: self.max_constraints,
        }
    }
}

/// Where generated plans go
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for saved plans (relative paths resolve from the working directory)
    #[serde(rename = "plans-dir")]
    pub plans_dir: String,

    /// Write each generated plan to disk
    #[serde(rename = "save-plans")]
    pub save_plans: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plans_dir: "plans".to_string(),
            save_plans: true,
        }
    }
}

impl OutputConfig {
    /// Expand the plans directory (resolve ~/)
    pub fn plans_path(&self) -> PathBuf {
        match self.plans_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(&self.plans_dir), |home| home.join(rest)),
            None => PathBuf::from(&self.plans_dir),
        }
    }
}
