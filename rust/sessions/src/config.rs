//! Registry configuration: defaults, then an optional TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SMALL_BLIND_ENV: &str = "HOLDEM_SMALL_BLIND";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const HISTORY_ENV: &str = "HOLDEM_HISTORY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Small blind used when a create request does not name one
    pub small_blind: u32,
    /// Fixed shuffle seed for every hand; random per hand when absent
    pub seed: Option<u64>,
    /// JSONL file receiving one line per settled hand
    pub history_path: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            small_blind: 1,
            seed: None,
            history_path: None,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(ConfigError::Invalid(
                "Invalid configuration: small_blind must be >0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub seed: ValueSource,
    pub history_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            seed: ValueSource::Default,
            history_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: RegistryConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

pub fn load() -> Result<RegistryConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = RegistryConfig::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = non_empty_env(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.history_path {
            cfg.history_path = Some(v);
            sources.history_path = ValueSource::File;
        }
    }

    if let Some(sb) = non_empty_env(SMALL_BLIND_ENV) {
        cfg.small_blind = sb
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid small blind: {sb}")))?;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(seed) = non_empty_env(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {seed}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(path) = non_empty_env(HISTORY_ENV) {
        cfg.history_path = Some(PathBuf::from(path));
        sources.history_path = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    history_path: Option<PathBuf>,
}
