//! Environment-variable configuration, loaded once at startup.
//!
//! Sightengine credentials are required; everything else has a development
//! default.

use anyhow::{Context, Result};

const DEFAULT_ENDPOINT: &str = "https://api.sightengine.com/1.0/video/check-sync.json";
const DEFAULT_MODELS: &str = "genai";
const DEFAULT_PORT: &str = "8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Allowed CORS origin; `*` permits any origin.
    pub cors_allow_origin: String,
    pub sightengine: SightengineConfig,
}

#[derive(Debug, Clone)]
pub struct SightengineConfig {
    pub api_user: String,
    pub api_secret: String,
    pub endpoint: String,
    pub models: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_user =
            std::env::var("SIGHTENGINE_API_USER").context("SIGHTENGINE_API_USER must be set")?;
        let api_secret = std::env::var("SIGHTENGINE_API_SECRET")
            .context("SIGHTENGINE_API_SECRET must be set")?;
        let endpoint = std::env::var("SIGHTENGINE_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let models =
            std::env::var("SIGHTENGINE_MODELS").unwrap_or_else(|_| DEFAULT_MODELS.to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let cors_allow_origin =
            std::env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        Ok(Self {
            port,
            cors_allow_origin,
            sightengine: SightengineConfig {
                api_user,
                api_secret,
                endpoint,
                models,
            },
        })
    }
}
