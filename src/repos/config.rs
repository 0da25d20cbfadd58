use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Error};
use dirs_next::config_dir;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const AOAI_CONFIG: &str = "AOAI_CONFIG";

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o";
pub const DEFAULT_API_VERSION: &str = "2024-06-01";

/// Keys accepted by `aoai config --get/--set`.
pub const CONFIG_KEYS: [&str; 4] = ["endpoint", "key", "deployment", "api_version"];

/// Defaults persisted between invocations. Every value is optional; flags and
/// environment variables take precedence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AoaiConfig {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub deployment: Option<String>,
    pub api_version: Option<String>,
}

impl AoaiConfig {
    pub fn get(&self, key: &str) -> Result<Option<&str>, Error> {
        let value = match key {
            "endpoint" => &self.endpoint,
            "key" => &self.key,
            "deployment" => &self.deployment,
            "api_version" => &self.api_version,
            _ => bail!(
                "unknown configuration key '{}', expected one of: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        };
        Ok(value.as_deref())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let slot = match key {
            "endpoint" => &mut self.endpoint,
            "key" => &mut self.key,
            "deployment" => &mut self.deployment,
            "api_version" => &mut self.api_version,
            _ => bail!(
                "unknown configuration key '{}', expected one of: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        };
        *slot = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        Ok(())
    }

    /// Copy with the API key masked, for printing.
    pub fn redacted(&self) -> Self {
        AoaiConfig {
            key: self.key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

static CONFIG: OnceCell<AoaiConfig> = OnceCell::new();

pub fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var(AOAI_CONFIG) {
        return PathBuf::from(path);
    }
    let mut path = config_dir()
        .or_else(|| env::current_dir().ok())
        .unwrap_or_default();
    path.push("aoai");
    path.push("aoai.toml");
    path
}

pub fn load_config_from(path: &Path) -> Result<AoaiConfig, Error> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(AoaiConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &AoaiConfig) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let toml_str = toml::to_string_pretty(config)?;
    fs::write(path, toml_str).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn load_config_file() -> AoaiConfig {
    let path = get_config_path();
    debug!("Loading config from {}", path.display());
    load_config_from(&path).unwrap_or_else(|e| {
        warn!("Ignoring config file: {:#}", e);
        AoaiConfig::default()
    })
}

pub fn get_config() -> &'static AoaiConfig {
    CONFIG.get_or_init(load_config_file)
}
