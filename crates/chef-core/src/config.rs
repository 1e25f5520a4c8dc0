use crate::error::{ChefError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefConfig {
    pub completion: CompletionConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ChefConfig {
    fn default() -> Self {
        Self {
            completion: CompletionConfig {
                api_key: String::new(),
                base_url: "https://api.groq.com/openai/v1".into(),
                model: "llama-3.3-70b-versatile".into(),
                temperature: 0.6,
                max_tokens: 250,
                timeout_secs: 30,
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".into(),
                format: "pretty".into(),
            },
        }
    }
}

impl ChefConfig {
    /// Load `.env` from the working directory (or a parent) into the process
    /// environment if one exists, then read the environment. Variables already
    /// set in the process are not overridden.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load from the process environment. Fails if the API key is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a dotenv file without touching the process environment. Process
    /// variables win over entries in the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_env_file_with(path.as_ref(), |key| std::env::var(key).ok())
    }

    pub(crate) fn from_env_file_with<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let entries: HashMap<String, String> = dotenvy::from_path_iter(path)
            .map_err(|e| ChefError::Config(format!("cannot read {}: {e}", path.display())))?
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ChefError::Config(format!("invalid entry in {}: {e}", path.display())))?;
        Self::from_lookup(|key| lookup(key).or_else(|| entries.get(key).cloned()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        cfg.completion.api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ChefError::Config(format!("{API_KEY_VAR} is not set")))?;

        if let Some(v) = lookup("CHEF_COMPLETION_BASE_URL") {
            cfg.completion.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("CHEF_MODEL") {
            cfg.completion.model = v;
        }
        if let Some(v) = lookup("CHEF_UPSTREAM_TIMEOUT_SECS") {
            cfg.completion.timeout_secs = parse_var("CHEF_UPSTREAM_TIMEOUT_SECS", &v)?;
            if cfg.completion.timeout_secs == 0 {
                return Err(ChefError::Config("CHEF_UPSTREAM_TIMEOUT_SECS must be at least 1".into()));
            }
        }
        if let Some(v) = lookup("CHEF_HOST") {
            cfg.server.host = v;
        }
        if let Some(v) = lookup("CHEF_PORT") {
            cfg.server.port = parse_var("CHEF_PORT", &v)?;
        }
        if let Some(v) = lookup("CHEF_LOG_LEVEL") {
            cfg.logging.level = v;
        }
        if let Some(v) = lookup("CHEF_LOG_FORMAT") {
            match v.as_str() {
                "json" | "pretty" => cfg.logging.format = v,
                other => {
                    return Err(ChefError::Config(format!(
                        "CHEF_LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
                    )))
                }
            }
        }

        Ok(cfg)
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ChefError::Config(format!("{name} has invalid value '{raw}'")))
}
