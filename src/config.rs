// Process configuration loaded once at startup

use std::fmt;

/// Errors raised while reading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment environment; controls the cookie `Secure` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::Invalid {
                name: "APP_ENV",
                value: value.to_string(),
            }),
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// Secret used to sign session tokens.
///
/// Held read-only in application state; `Debug` never prints the secret.
#[derive(Clone)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "ACCESS_TOKEN_SECRET",
                value: "<empty>".to_string(),
            });
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub signing_key: SigningKey,
    pub templates_dir: String,
}

impl AppConfig {
    /// Read configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let secret =
            lookup("ACCESS_TOKEN_SECRET").ok_or(ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => 5500,
        };
        let environment = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw)?,
            None => Environment::Production,
        };
        let templates_dir = lookup("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            environment,
            signing_key: SigningKey::new(secret)?,
            templates_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
