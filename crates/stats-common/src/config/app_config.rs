//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub slack: SlackConfig,
    pub reconciler: ReconcilerSettings,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Slack workspace credentials and report destination
#[derive(Clone, Deserialize)]
pub struct SlackConfig {
    /// Verifies inbound Events API requests when set
    #[serde(default)]
    pub signing_secret: Option<String>,
    pub bot_token: String,
    pub channel_id: String,
    #[serde(default = "default_slack_api_base")]
    pub api_base: String,
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "***"))
            .field("bot_token", &"***")
            .field("channel_id", &self.channel_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Reaction filtering settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcilerSettings {
    /// Identities whose items never collect counts
    #[serde(default = "default_reserved_identities")]
    pub reserved_identities: Vec<String>,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            reserved_identities: default_reserved_identities(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "reaction-stats".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_slack_api_base() -> String {
    "https://slack.com/api".to_string()
}

fn default_reserved_identities() -> Vec<String> {
    vec![stats_core::SLACKBOT_IDENTITY.to_string()]
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVar(key));
        let parsed = |key: &'static str| -> Result<Option<u32>, ConfigError> {
            lookup(key)
                .map(|raw| {
                    raw.parse()
                        .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
                })
                .transpose()
        };

        let env = match lookup("APP_ENV") {
            Some(raw) => {
                Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?
            }
            None => default_env(),
        };

        let port_raw = required("API_PORT")?;
        let port = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue("API_PORT", port_raw.clone()))?;

        let reserved_identities = lookup("STATS_RESERVED_IDENTITIES")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(default_reserved_identities);

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            slack: SlackConfig {
                signing_secret: lookup("SLACK_SIGNING_SECRET").filter(|s| !s.is_empty()),
                bot_token: required("SLACK_BOT_TOKEN")?,
                channel_id: required("SLACK_CHANNEL_ID")?,
                api_base: lookup("SLACK_API_BASE").unwrap_or_else(default_slack_api_base),
            },
            reconciler: ReconcilerSettings {
                reserved_identities,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
