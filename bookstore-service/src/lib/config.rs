use std::env;

use auth::ConfigurationError;
use auth::SigningConfig;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// Absent means principals live in process memory.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Upper bound on `jwt.expiration_minutes` (30 days).
pub const MAX_EXPIRATION_MINUTES: i64 = 30 * 24 * 60;

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub algorithm: String,
    pub secret: String,
    pub expiration_minutes: i64,
}

impl JwtConfig {
    /// Validate the signing settings.
    ///
    /// Called once at startup; an error here must abort the process.
    pub fn signing_config(&self) -> Result<SigningConfig, ConfigurationError> {
        SigningConfig::new(&self.algorithm, &self.secret)
    }

    /// Validate the token lifetime.
    ///
    /// Must be positive and at most `MAX_EXPIRATION_MINUTES`; like the signing
    /// settings, an error here must abort the process.
    pub fn token_ttl(&self) -> Result<Duration, ConfigurationError> {
        if !(1..=MAX_EXPIRATION_MINUTES).contains(&self.expiration_minutes) {
            return Err(ConfigurationError::InvalidTokenLifetime {
                max: MAX_EXPIRATION_MINUTES,
                actual: self.expiration_minutes,
            });
        }

        Ok(Duration::minutes(self.expiration_minutes))
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("secret", &"[redacted]")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, JWT__ALGORITHM, SERVER__HTTP_PORT, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `jwt.algorithm` and `jwt.secret` have no defaults; loading fails if
    /// either is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8000)?
            .set_default("jwt.expiration_minutes", 30)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            // Values stay strings; deserialization converts them per field type.
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
