use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8080
}

fn default_max_connections() -> u32 {
  10
}

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_jwt_expiration() -> i64 {
  86_400
}

/// Longest accepted token lifetime, one year
pub const MAX_JWT_EXPIRATION_SECONDS: i64 = 365 * 86_400;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  #[serde(default = "default_max_connections")]
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Token signing settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
  /// Base64 encoded HMAC key, e.g. `openssl rand -base64 64`
  pub secret: String,
  #[serde(default = "default_jwt_expiration")]
  pub expiration_seconds: i64,
}

impl JwtConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.secret.trim().is_empty() {
      return Err(ConfigError::Message("jwt.secret must not be empty".into()));
    }
    if !(1..=MAX_JWT_EXPIRATION_SECONDS).contains(&self.expiration_seconds) {
      return Err(ConfigError::Message(format!(
        "jwt.expiration_seconds must be between 1 and {}, got {}",
        MAX_JWT_EXPIRATION_SECONDS, self.expiration_seconds
      )));
    }
    Ok(())
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables such as `BILLDESK_DATABASE__URL` or `BILLDESK_JWT__SECRET`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("BILLDESK")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    let config: Self = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
  }

  /// Rejects values that deserialize fine but cannot be used at runtime
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.jwt.validate()
  }
}
