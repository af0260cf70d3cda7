//! Configuration management for the Weather Alert System
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WAS_ prefix
//! 4. `METEOMATICS_API_USERNAME` / `METEOMATICS_API_PASSWORD` for credentials

use config::{ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_METEOMATICS_URL: &str = "https://api.meteomatics.com";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub meteomatics: MeteomaticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct MeteomaticsConfig {
    /// Provider base URL
    pub base_url: String,

    /// Basic-auth user; absence is reported on the first provider call
    pub username: Option<String>,

    /// Basic-auth password
    pub password: Option<String>,
}

impl MeteomaticsConfig {
    /// Both halves of the credential pair, if configured and non-empty
    pub fn credentials(&self) -> Option<(String, String)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.to_string(), pass.to_string()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for MeteomaticsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeteomaticsConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WAS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("meteomatics.base_url", DEFAULT_METEOMATICS_URL)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WAS_ prefix)
            .add_source(
                Environment::with_prefix("WAS")
                    .separator("__")
                    .try_parsing(true),
            )
            // Credential variable names used by existing deployments
            .set_override_option(
                "meteomatics.username",
                std::env::var("METEOMATICS_API_USERNAME").ok(),
            )?
            .set_override_option(
                "meteomatics.password",
                std::env::var("METEOMATICS_API_PASSWORD").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for MeteomaticsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_METEOMATICS_URL.to_string(),
            username: None,
            password: None,
        }
    }
}
