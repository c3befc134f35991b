//! Video detection relay route.
//!
//! Accepts one multipart upload, spools it to disk, forwards it to
//! Sightengine, and returns the aggregated verdict together with the
//! verbatim upstream payload.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::value::RawValue;
use std::sync::Arc;

use crate::AppState;
use crate::analysis;
use crate::services::error::LogErr;
use crate::spool::SpooledUpload;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/detect-video", post(detect_video))
}

/// Summary returned to the caller.
#[derive(Serialize)]
pub struct DetectionSummary {
    pub filename: String,
    pub ai_detected: bool,
    pub confidence: f64,
    pub frames_checked: usize,
    /// Upstream response body, relayed byte-identical.
    pub raw: Box<RawValue>,
}

struct Upload {
    filename: String,
    data: Bytes,
}

/// POST /detect-video - Relay an uploaded video to the detection service
async fn detect_video(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<DetectionSummary>, StatusCode> {
    let upload = read_upload(&mut multipart).await?;

    // The spool dir is dropped on every exit path below, removing the file.
    let spool = SpooledUpload::write(&upload.filename, &upload.data)
        .await
        .log_500("spool upload")?;

    let response = state
        .sightengine
        .check_video(spool.path(), &upload.filename)
        .await
        .log_status("sightengine video check", StatusCode::BAD_GATEWAY)?;

    let stats = analysis::summarize(&response.parsed);
    tracing::info!(
        filename = %upload.filename,
        frames_checked = stats.frames_checked,
        confidence = stats.confidence,
        ai_detected = stats.ai_detected,
        "video checked"
    );

    Ok(Json(DetectionSummary {
        filename: upload.filename,
        ai_detected: stats.ai_detected,
        confidence: stats.confidence,
        frames_checked: stats.frames_checked,
        raw: response.raw,
    }))
}

/// Pull the `file` field out of the multipart body.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .log_status("read multipart field", StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field
            .bytes()
            .await
            .log_status("read upload bytes", StatusCode::BAD_REQUEST)?;
        return Ok(Upload { filename, data });
    }

    tracing::error!("multipart body has no 'file' field");
    Err(StatusCode::BAD_REQUEST)
}
