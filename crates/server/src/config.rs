//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OCULOG_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `OCULOG_HOST` - Bind address (default: 127.0.0.1)
//! - `OCULOG_PORT` - Listen port (default: 3000)
//! - `OCULOG_CORS_ORIGIN` - Comma-separated origin allow-list
//!   (default: <http://localhost:8080>)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or an optional
    /// one fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require_env("OCULOG_DATABASE_URL")?.into();

        let host = optional_env("OCULOG_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_owned())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("OCULOG_HOST".to_owned(), e.to_string()))?;

        let port = match optional_env("OCULOG_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("OCULOG_PORT".to_owned(), e.to_string())
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins = parse_origins(
            &optional_env("OCULOG_CORS_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_owned()),
        );

        Ok(Self {
            database_url,
            host,
            port,
            cors_origins,
        })
    }

    /// The socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Split a comma-separated origin list, dropping empty fragments.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}
