//! Configuration: a TOML file with env-var credential resolution.
//!
//! Every field has a serde default, so an empty or missing file yields a
//! working configuration. The API credential itself never lives in the file;
//! the file only names the environment variable that holds it.

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full chat-completions endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Vision-capable model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the bearer credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Overall request timeout. Vision analysis is slow; keep this generous.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Used when the caller does not supply a bill amount.
    #[serde(default = "default_monthly_bill")]
    pub default_monthly_bill_usd: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_monthly_bill_usd: default_monthly_bill(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}
fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}
fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}
fn default_max_tokens() -> u32 {
    1500
}
fn default_timeout_secs() -> u64 {
    90
}
fn default_monthly_bill() -> f64 {
    150.0
}
fn default_bind() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8420
}

impl Config {
    /// Load from an explicit path, or from the default location. A missing
    /// file is not an error; defaults apply.
    pub fn load(path_override: Option<&str>) -> Result<Self> {
        let path = match path_override {
            Some(p) => PathBuf::from(shellexpand::tilde(p).to_string()),
            None => Self::config_path()?,
        };

        let config: Config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "solsight")
            .context("Could not determine a config directory for this platform")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.model.trim().is_empty() {
            anyhow::bail!("api.model must not be empty");
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            anyhow::bail!("api.base_url must be an http(s) URL: {}", self.api.base_url);
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }
        if self.api.max_tokens == 0 {
            anyhow::bail!("api.max_tokens must be greater than zero");
        }
        if self.analysis.default_monthly_bill_usd < 0.0 {
            anyhow::bail!("analysis.default_monthly_bill_usd must not be negative");
        }
        Ok(())
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# solsight configuration
#
# The API credential is read from the environment variable named by
# api_key_env; it is never stored in this file.

[api]
# base_url = "https://openrouter.ai/api/v1/chat/completions"
# model = "openai/gpt-4o-mini"
# api_key_env = "OPENROUTER_API_KEY"
# max_tokens = 1500
# timeout_secs = 90

[analysis]
# default_monthly_bill_usd = 150.0

[server]
# bind = "127.0.0.1"
# port = 8420
"#;
