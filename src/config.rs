//! TOML configuration.
//!
//! Every section is optional; anything left out falls back to the
//! production defaults, so an empty file (or no file at all, via
//! [`Config::minimal`]) talks to the real upstream service.
//!
//! ```toml
//! [upstream]
//! base_url = "https://apidisplaypurposes.com"
//! user_agent = "Mozilla/5.0 (...)"
//!
//! [http]
//! timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tagscope_core::query::{Endpoint, DEFAULT_BASE_URL};
use tagscope_core::token::DEFAULT_USER_AGENT;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `user-agent` and used as the token identity.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Production defaults, used when no config file is given.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Config pointing at another upstream, e.g. a local stub.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            upstream: UpstreamConfig {
                base_url: base_url.into(),
                ..UpstreamConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(&self.upstream.base_url, &self.upstream.user_agent)
    }

    pub fn validate(&self) -> Result<()> {
        let base = &self.upstream.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!("upstream.base_url must start with http:// or https://, got '{}'", base);
        }
        if self.upstream.user_agent.trim().is_empty() {
            anyhow::bail!("upstream.user_agent must not be empty");
        }
        if self.http.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be > 0");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}
