//! Outbound client for the Sightengine synchronous video check API.
//!
//! One call per upload: credentials and the model selector travel as query
//! parameters, the video itself as a `media` multipart part. The upstream
//! body is kept verbatim so the relay can return it byte-identical.

use serde_json::Value;
use serde_json::value::RawValue;
use std::path::Path;

use crate::config::SightengineConfig;

#[derive(Clone)]
pub struct SightengineClient {
    api_user: String,
    api_secret: String,
    endpoint: String,
    models: String,
    http: reqwest::Client,
}

/// One upstream response, in both verbatim and parsed form.
#[derive(Debug)]
pub struct CheckResponse {
    /// Exact upstream body, relayed untouched in the `raw` field.
    pub raw: Box<RawValue>,
    /// Parsed view used for frame aggregation.
    pub parsed: Value,
}

impl SightengineClient {
    pub fn new(config: SightengineConfig) -> Self {
        Self {
            api_user: config.api_user,
            api_secret: config.api_secret,
            endpoint: config.endpoint,
            models: config.models,
            http: reqwest::Client::new(),
        }
    }

    /// Submit a spooled video file for a synchronous check.
    pub async fn check_video(
        &self,
        path: &Path,
        filename: &str,
    ) -> Result<CheckResponse, SightengineError> {
        let contents = tokio::fs::read(path).await?;

        let part = reqwest::multipart::Part::bytes(contents).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("media", part);

        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[
                ("api_user", self.api_user.as_str()),
                ("api_secret", self.api_secret.as_str()),
                ("models", self.models.as_str()),
            ])
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(SightengineError::Api(format!(
                "status {}: {}",
                status, text
            )));
        }

        let parsed: Value = serde_json::from_str(&text)
            .map_err(|e| SightengineError::Api(format!("unparseable response: {}", e)))?;
        let raw = RawValue::from_string(text)
            .map_err(|e| SightengineError::Api(format!("unparseable response: {}", e)))?;

        Ok(CheckResponse { raw, parsed })
    }
}

#[derive(Debug)]
pub enum SightengineError {
    Http(reqwest::Error),
    Io(std::io::Error),
    Api(String),
}

impl From<reqwest::Error> for SightengineError {
    fn from(e: reqwest::Error) -> Self {
        SightengineError::Http(e)
    }
}

impl From<std::io::Error> for SightengineError {
    fn from(e: std::io::Error) -> Self {
        SightengineError::Io(e)
    }
}

impl std::fmt::Display for SightengineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SightengineError::Http(e) => write!(f, "HTTP error: {}", e),
            SightengineError::Io(e) => write!(f, "I/O error: {}", e),
            SightengineError::Api(s) => write!(f, "Sightengine API error: {}", s),
        }
    }
}

impl std::error::Error for SightengineError {}
