//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GREENGROCER_CATALOG_URL` - Base URL of the catalog service
//!   (default: `http://localhost:3000`)
//! - `GREENGROCER_DATA_DIR` - Directory for the persisted session and cart
//!   blobs (default: `./greengrocer-data`)
//!
//! A `.env` file in the working directory is honored via `dotenvy`.

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const CATALOG_URL_VAR: &str = "GREENGROCER_CATALOG_URL";
const DATA_DIR_VAR: &str = "GREENGROCER_DATA_DIR";

const DEFAULT_CATALOG_URL: &str = "http://localhost:3000";
const DEFAULT_DATA_DIR: &str = "greengrocer-data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Catalog service configuration.
    pub catalog: CatalogConfig,
    /// Directory holding the persisted session/cart blobs.
    pub data_dir: PathBuf,
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    pub base_url: Url,
}

impl EngineConfig {
    /// Load the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `GREENGROCER_CATALOG_URL` is set but is not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real env vars still apply
        dotenvy::dotenv().ok();

        let raw_url =
            env::var(CATALOG_URL_VAR).unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_owned());
        let base_url = parse_base_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar(CATALOG_URL_VAR.to_owned(), e))?;

        let data_dir = env::var(DATA_DIR_VAR)
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self {
            catalog: CatalogConfig { base_url },
            data_dir,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.host_str().is_none() {
        return Err("URL must have a host".to_owned());
    }
    Ok(url)
}
