//! Client configuration.
//!
//! # Environment Variables
//!
//! - `OCULOG_API_URL` - Base URL of the usage-log store API
//!   (default: <http://localhost:3000/api>)
//! - `OCULOG_DATA_PATH` - Path of the local mirror file
//!   (default: `oculog-data.json` in the working directory)

use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_DATA_PATH: &str = "oculog-data.json";

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the usage-log store API, including the `/api` prefix
    pub api_base_url: String,
    /// Where the local mirror blob is persisted
    pub data_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to the
    /// localhost defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("OCULOG_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let data_path = std::env::var_os("OCULOG_DATA_PATH")
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);

        Self {
            api_base_url,
            data_path,
        }
    }
}
