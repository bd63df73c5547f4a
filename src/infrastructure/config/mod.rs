//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Bot configuration. Tunables only; secrets live in `Secrets`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub store: StoreConfig,
    pub matcher: MatcherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Phone number the console adapter pretends to text from
    pub dev_phone: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StoreConfig {
    /// Per-operation timeout; kept short so the degraded path is reached
    /// quickly instead of stalling the conversation
    pub timeout_ms: u64,
    pub profile_ttl_days: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MatcherConfig {
    pub threshold: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "memobot".to_string(),
            dev_phone: "+15550000000".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2000,
            profile_ttl_days: 365,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: crate::application::services::DEFAULT_THRESHOLD,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }
}

/// Secret configuration, environment only.
///
/// The hash salt is mandatory: identity hashing must never run unsalted, and
/// mixing salts within one deployment would silently fragment user identity.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub hash_salt: String,
    pub redis_url: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Result<Self, ConfigError> {
        let hash_salt = std::env::var("PHONE_HASH_SALT")
            .map_err(|_| ConfigError::MissingField("PHONE_HASH_SALT".to_string()))?;
        if hash_salt.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "PHONE_HASH_SALT must not be empty".to_string(),
            ));
        }

        let redis_url = std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        Ok(Self {
            hash_salt,
            redis_url,
        })
    }
}
