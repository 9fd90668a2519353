//! Configuration loading, validation, and management for Aftercare.
//!
//! Loads configuration from a TOML file with environment variable overrides
//! (`AFTERCARE_DATA_DIR`, `AFTERCARE_NARRATIVE_URL`, `AFTERCARE_NARRATIVE_KEY`).
//! Validates all settings before a run starts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// How many days to simulate per patient
    #[serde(default = "default_days")]
    pub days: u32,

    /// Directory holding durable per-patient records
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Path of the escalation log (JSONL)
    #[serde(default = "default_escalation_log")]
    pub escalation_log: PathBuf,

    /// Path of the guideline knowledge base (JSON); a missing file falls
    /// back to the built-in guideline set
    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: PathBuf,

    /// Session memory configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Narrative-generation collaborator configuration
    #[serde(default)]
    pub narrative: NarrativeConfig,

    /// Engagement simulation configuration
    #[serde(default)]
    pub engagement: EngagementConfig,
}

fn default_days() -> u32 {
    7
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data/patients")
}
fn default_escalation_log() -> PathBuf {
    PathBuf::from("data/escalations.jsonl")
}
fn default_knowledge_base() -> PathBuf {
    PathBuf::from("data/knowledge_base.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum turns kept per patient session; oldest dropped first
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

fn default_max_turns() -> usize {
    20
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Base URL of the narrative service; empty means "use the scripted
    /// offline provider"
    #[serde(default)]
    pub base_url: String,

    /// Optional API key for the narrative service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_narrative_timeout")]
    pub timeout_secs: u64,
}

fn default_narrative_timeout() -> u64 {
    30
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout_secs: default_narrative_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementConfig {
    /// Optional seed for a reproducible engagement simulation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for SimConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimConfig")
            .field("days", &self.days)
            .field("data_dir", &self.data_dir)
            .field("escalation_log", &self.escalation_log)
            .field("knowledge_base", &self.knowledge_base)
            .field("session", &self.session)
            .field("narrative", &self.narrative)
            .field("engagement", &self.engagement)
            .finish()
    }
}

impl std::fmt::Debug for NarrativeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            data_dir: default_data_dir(),
            escalation_log: default_escalation_log(),
            knowledge_base: default_knowledge_base(),
            session: SessionConfig::default(),
            narrative: NarrativeConfig::default(),
            engagement: EngagementConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load from a TOML file, then apply environment overrides.
    /// A missing file yields the defaults (still env-overridable).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
            toml::from_str(&text)
                .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `AFTERCARE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("AFTERCARE_DATA_DIR") {
            if !dir.is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(url) = std::env::var("AFTERCARE_NARRATIVE_URL") {
            if !url.is_empty() {
                self.narrative.base_url = url;
            }
        }
        if let Ok(key) = std::env::var("AFTERCARE_NARRATIVE_KEY") {
            if !key.is_empty() {
                self.narrative.api_key = Some(key);
            }
        }
    }

    /// Validate settings. Called at startup; failures are caller-fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::Invalid("days must be at least 1".into()));
        }
        if self.session.max_turns == 0 {
            return Err(ConfigError::Invalid(
                "session.max_turns must be at least 1".into(),
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        if self.escalation_log.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "escalation_log must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors. These are caller-fatal: a run never starts with a
/// broken configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config IO error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
