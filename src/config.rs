//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "0.0.0.0";
    pub const DEV_PORT: u16 = 4200;
    pub const DEV_MYSQL_HOST: &str = "localhost";
    pub const DEV_MYSQL_USER: &str = "root";
    pub const DEV_MYSQL_DATABASE: &str = "base_crda";
    pub const DEV_MYSQL_PORT: u16 = 3306;
    pub const DEV_DB_MAX_CONNECTIONS: u32 = 10;
    pub const DEV_DB_MAX_RETRIES: u32 = 5;
    pub const DEV_DB_RETRY_INTERVAL_SECS: u64 = 5;
    pub const DEV_SESSION_SECRET: &str = "default-insecure-secret";
    pub const DEV_SESSION_TTL_SECS: u64 = 86_400;
    pub const DEV_CORS_ORIGIN: &str = "*";
    pub const DEV_ORG_EMAIL_DOMAIN: &str = "@crda.com";
    pub const DEV_STATIC_DIR: &str = "public";
}

/// Longest accepted session lifetime (one year).
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 86_400;

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// MySQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub database: String,
    /// Upper bound of pooled connections
    pub max_connections: u32,
    /// Connection attempts made at startup before giving up
    pub max_retries: u32,
    /// Delay between startup connection attempts
    pub retry_interval: Duration,
}

impl DatabaseSettings {
    /// Build the `mysql://` connection URL.
    ///
    /// The result embeds the password, so it must never be logged.
    pub fn url(&self) -> SecretString {
        SecretString::from(format!(
            "mysql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(self.password.expose_secret()),
            self.host,
            self.port,
            self.database
        ))
    }

    /// Connection target safe to print (no credentials).
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// HMAC secret used to sign session cookies
    pub secret: SecretString,
    /// Session lifetime in seconds
    pub ttl_secs: u64,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// MySQL settings
    pub database: DatabaseSettings,
    /// Session settings
    pub session: SessionSettings,
    /// Allowed CORS origin (`*` allows any)
    pub cors_origin: String,
    /// Email suffix required at registration
    pub org_email_domain: String,
    /// Directory with public assets (css, images)
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a development default. In production
    /// (`RUST_ENV=production`) the server refuses to start with the
    /// development session secret.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production, default: development)
    /// - `HOST` / `PORT`: Bind address (default: 0.0.0.0:4200)
    /// - `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD`, `MYSQL_DATABASE`
    /// - `DB_MAX_CONNECTIONS`: Pool size (default: 10)
    /// - `DB_MAX_RETRIES`: Startup connection attempts (default: 5)
    /// - `DB_RETRY_INTERVAL_SECS`: Delay between attempts (default: 5)
    /// - `SESSION_SECRET`: Session signing secret
    /// - `SESSION_TTL_SECS`: Session lifetime (default: 86400)
    /// - `CORS_ORIGIN`: Allowed origin (default: *)
    /// - `ORG_EMAIL_DOMAIN`: Registration email suffix (default: @crda.com)
    /// - `STATIC_DIR`: Public assets directory (default: public)
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("RUST_ENV") {
            Ok(value) => Environment::parse(&value).ok_or(ConfigError::InvalidValue(
                "RUST_ENV must be 'development' or 'production'",
            ))?,
            Err(_) => Environment::Development,
        };

        let host = env::var("HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());
        let port = parse_var("PORT", defaults::DEV_PORT, "PORT must be a valid port number")?;

        let database = DatabaseSettings {
            host: env::var("MYSQL_HOST").unwrap_or_else(|_| defaults::DEV_MYSQL_HOST.to_string()),
            port: parse_var(
                "MYSQL_PORT",
                defaults::DEV_MYSQL_PORT,
                "MYSQL_PORT must be a valid port number",
            )?,
            user: env::var("MYSQL_USER").unwrap_or_else(|_| defaults::DEV_MYSQL_USER.to_string()),
            password: SecretString::from(env::var("MYSQL_PASSWORD").unwrap_or_default()),
            database: env::var("MYSQL_DATABASE")
                .unwrap_or_else(|_| defaults::DEV_MYSQL_DATABASE.to_string()),
            max_connections: parse_var(
                "DB_MAX_CONNECTIONS",
                defaults::DEV_DB_MAX_CONNECTIONS,
                "DB_MAX_CONNECTIONS must be a valid number",
            )?,
            max_retries: parse_var(
                "DB_MAX_RETRIES",
                defaults::DEV_DB_MAX_RETRIES,
                "DB_MAX_RETRIES must be a valid number",
            )?,
            retry_interval: Duration::from_secs(parse_var(
                "DB_RETRY_INTERVAL_SECS",
                defaults::DEV_DB_RETRY_INTERVAL_SECS,
                "DB_RETRY_INTERVAL_SECS must be a valid number",
            )?),
        };

        let session = SessionSettings {
            secret: SecretString::from(
                env::var("SESSION_SECRET")
                    .unwrap_or_else(|_| defaults::DEV_SESSION_SECRET.to_string()),
            ),
            ttl_secs: check_session_ttl(parse_var(
                "SESSION_TTL_SECS",
                defaults::DEV_SESSION_TTL_SECS,
                "SESSION_TTL_SECS must be a valid number",
            )?)?,
        };

        let config = Config {
            environment,
            host,
            port,
            database,
            session,
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| defaults::DEV_CORS_ORIGIN.to_string()),
            org_email_domain: env::var("ORG_EMAIL_DOMAIN")
                .unwrap_or_else(|_| defaults::DEV_ORG_EMAIL_DOMAIN.to_string()),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(defaults::DEV_STATIC_DIR)),
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.session.secret.expose_secret() == defaults::DEV_SESSION_SECRET {
            errors.push(
                "SESSION_SECRET is using the development default. Set a strong random secret."
                    .to_string(),
            );
        }

        if self.session.secret.expose_secret().len() < 32 {
            errors.push("SESSION_SECRET must be at least 32 characters long.".to_string());
        }

        if self.session.ttl_secs == 0 {
            errors.push("SESSION_TTL_SECS must be greater than zero.".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &str,
    default: T,
    message: &'static str,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse::<T>().map_err(|_| ConfigError::InvalidValue(message)),
        Err(_) => Ok(default),
    }
}

fn check_session_ttl(ttl_secs: u64) -> Result<u64, ConfigError> {
    if ttl_secs > MAX_SESSION_TTL_SECS {
        return Err(ConfigError::InvalidValue(
            "SESSION_TTL_SECS must not exceed 31536000 (one year)",
        ));
    }
    Ok(ttl_secs)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
