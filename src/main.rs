mod analysis;
mod config;
mod routes;
mod services;
mod spool;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use config::Config;
use services::sightengine::SightengineClient;

const MAX_UPLOAD_SIZE: usize = 200 * 1024 * 1024; // 200 MB limit for uploads

pub struct AppState {
    pub sightengine: SightengineClient,
}

/// CORS layer for the configured origin; `*` keeps the permissive dev default.
fn cors_layer(allow_origin: &str) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    Ok(match allow_origin {
        "*" => cors.allow_origin(Any),
        origin => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("invalid CORS_ALLOW_ORIGIN: {origin:?}"))?;
            cors.allow_origin(origin)
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let cors = cors_layer(&config.cors_allow_origin)?;

    let state = Arc::new(AppState {
        sightengine: SightengineClient::new(config.sightengine),
    });

    let app = routes::build_routes()
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_wildcard_and_explicit_origins() {
        assert!(cors_layer("*").is_ok());
        assert!(cors_layer("http://localhost:3000").is_ok());
    }

    #[test]
    fn cors_layer_rejects_malformed_origins() {
        assert!(cors_layer("bad\norigin").is_err());
    }
}
