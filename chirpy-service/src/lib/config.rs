use std::env;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub refresh_tokens: RefreshTokenConfig,
    pub polka: PolkaConfig,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_file_server_root")]
    pub file_server_root: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshTokenConfig {
    #[serde(default = "default_refresh_token_ttl_days")]
    pub ttl_days: i64,
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

/// Third-party payment provider whose webhook upgrades users.
#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

/// Deployment platform. Destructive admin endpoints only run on `Dev`.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    #[default]
    Prod,
}

const MAX_ACCESS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 365;

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_file_server_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_access_token_ttl_secs() -> i64 {
    60 * 60
}

fn default_refresh_token_ttl_days() -> i64 {
    auth::refresh::default_refresh_ttl().num_days()
}

fn default_store_timeout_ms() -> u64 {
    2_000
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, POLKA__API_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the services cannot run with.
    ///
    /// TTL bounds keep every expiry representable, so minting a token never
    /// overflows the clock arithmetic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }

        if self.polka.api_key.is_empty() {
            return Err(ConfigError::Message(
                "polka.api_key must not be empty".to_string(),
            ));
        }

        if !(1..=MAX_ACCESS_TOKEN_TTL_SECS).contains(&self.jwt.access_token_ttl_secs) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_secs must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_SECS
            )));
        }

        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.refresh_tokens.ttl_days) {
            return Err(ConfigError::Message(format!(
                "refresh_tokens.ttl_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_TTL_DAYS
            )));
        }

        if self.refresh_tokens.store_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "refresh_tokens.store_timeout_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.jwt.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_tokens.ttl_days)
    }

    pub fn store_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_tokens.store_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/chirpy".to_string(),
                max_connections: default_max_connections(),
                acquire_timeout_secs: default_acquire_timeout_secs(),
            },
            server: ServerConfig {
                http_port: 8080,
                file_server_root: default_file_server_root(),
            },
            jwt: JwtConfig {
                secret: "test_secret_key_at_least_32_bytes!".to_string(),
                access_token_ttl_secs: default_access_token_ttl_secs(),
            },
            refresh_tokens: RefreshTokenConfig {
                ttl_days: default_refresh_token_ttl_days(),
                store_timeout_ms: default_store_timeout_ms(),
            },
            polka: PolkaConfig {
                api_key: "f271c81ff7084ee5b99a5091b42d486e".to_string(),
            },
            platform: Platform::Dev,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = config();

        assert!(config.validate().is_ok());
        assert_eq!(config.access_token_ttl(), chrono::Duration::hours(1));
        assert_eq!(config.refresh_token_ttl(), chrono::Duration::days(60));
    }

    #[test]
    fn test_empty_secrets_rejected() {
        let mut config = config();
        config.jwt.secret.clear();
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.polka.api_key.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_ttls_rejected() {
        for secs in [0, -1, -3600] {
            let mut config = config();
            config.jwt.access_token_ttl_secs = secs;
            assert!(config.validate().is_err(), "access ttl {} accepted", secs);
        }

        for days in [0, -60] {
            let mut config = config();
            config.refresh_tokens.ttl_days = days;
            assert!(config.validate().is_err(), "refresh ttl {} accepted", days);
        }
    }

    #[test]
    fn test_out_of_range_ttls_rejected() {
        let mut config = config();
        config.jwt.access_token_ttl_secs = i64::MAX;
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.refresh_tokens.ttl_days = i64::MAX;
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.refresh_tokens.ttl_days = MAX_REFRESH_TOKEN_TTL_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_store_timeout_rejected() {
        let mut config = config();
        config.refresh_tokens.store_timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
