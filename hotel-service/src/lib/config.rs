use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: auth::HashingCost,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. Empty selects the in-memory repositories.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
    #[serde(default)]
    pub leeway_seconds: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GateConfig {
    /// Look the token subject up on every gated request so deleted users
    /// are locked out before their token expires.
    #[serde(default)]
    pub refresh_identity: bool,
}

/// Longest accepted token lifetime: one year.
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

impl JwtConfig {
    /// Token lifetime, checked to be positive and at most
    /// [`MAX_EXPIRATION_HOURS`].
    pub fn token_lifetime(&self) -> Result<chrono::Duration, ConfigError> {
        let hours = self.expiration_hours;
        if !(1..=MAX_EXPIRATION_HOURS).contains(&hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, hours
            )));
        }

        chrono::Duration::try_hours(hours).ok_or_else(|| {
            ConfigError::Message(format!("jwt.expiration_hours {} is out of range", hours))
        })
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    auth::issuer::DEFAULT_TOKEN_LIFETIME_HOURS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.token_lifetime()?;

        Ok(config)
    }

    /// Settings for the authentication core derived from this configuration.
    pub fn auth_settings(&self) -> Result<auth::AuthSettings, ConfigError> {
        Ok(auth::AuthSettings {
            token_lifetime: self.jwt.token_lifetime()?,
            leeway_seconds: self.jwt.leeway_seconds,
            cost: self.password,
            ..auth::AuthSettings::default()
        })
    }
}
