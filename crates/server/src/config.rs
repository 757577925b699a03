//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Token signing secret (min 32 chars, no placeholders)
//!
//! ## Optional
//! - `DRIFTLINE_HOST` - Bind address (default: 127.0.0.1)
//! - `DRIFTLINE_PORT` - Listen port (default: 3000)
//! - `DATA_PERSIST` - `memory` | `file` (default: memory)
//! - `DATA_DIR` - Snapshot directory in file mode (default: ./data)
//! - `FRONTEND_ORIGIN` - Allowed CORS origin (default: http://localhost:3000)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use crate::store::{PersistMode, StoreConfig};

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Persistence mode for the record store.
    pub persist: PersistMode,
    /// Snapshot directory used in file mode.
    pub data_dir: PathBuf,
    /// Token signing secret.
    pub jwt_secret: SecretString,
    /// Frontend origin allowed by CORS.
    pub frontend_origin: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// invalid, or if the JWT secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("DRIFTLINE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DRIFTLINE_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("DRIFTLINE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DRIFTLINE_PORT".to_owned(), e.to_string()))?;
        let persist = get_env_or_default("DATA_PERSIST", "memory")
            .parse::<PersistMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("DATA_PERSIST".to_owned(), e))?;
        let data_dir = PathBuf::from(get_env_or_default("DATA_DIR", "./data"));
        let jwt_secret = get_validated_secret("JWT_SECRET")?;
        let frontend_origin = get_env_or_default("FRONTEND_ORIGIN", "http://localhost:3000");

        Ok(Self {
            host,
            port,
            persist,
            data_dir,
            jwt_secret,
            frontend_origin,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Store construction options derived from this configuration.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            mode: self.persist,
            data_dir: self.data_dir.clone(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Load a secret and reject short or placeholder values.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {MIN_JWT_SECRET_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_owned(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
