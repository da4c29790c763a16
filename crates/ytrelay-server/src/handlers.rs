//! The two endpoint handlers: stream info and download relay
//!
//! Each request is a single linear pass: validate, ask the extraction
//! collaborator, answer. Nothing is cached or shared between requests
//! beyond the extractor handle itself.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use ytrelay_core::{progressive_descriptors, ExtractError, Extractor, FormatDescriptor};

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn Extractor>,
}

#[derive(Debug, Deserialize)]
pub struct InfoParams {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
    pub itag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub resolutions: Vec<FormatDescriptor>,
}

/// GET /get-info?url=...
///
/// Lists the progressive (audio+video) variants available for a URL.
pub async fn get_info(
    State(state): State<AppState>,
    Query(params): Query<InfoParams>,
) -> ApiResult<Json<InfoResponse>> {
    let url = params.url.unwrap_or_default();
    if !state.extractor.is_valid_url(&url) {
        return Err(ApiError::invalid_input("invalid video URL"));
    }

    let info = state
        .extractor
        .video_info(&url)
        .await
        .map_err(|err| upstream(err, "error fetching video info"))?;

    Ok(Json(InfoResponse {
        resolutions: progressive_descriptors(&info.formats),
    }))
}

/// GET /download?url=...&itag=...
///
/// Relays the selected variant's bytes straight through to the caller as an
/// attachment. The itag must be one previously advertised by /get-info for
/// the same URL; we re-resolve metadata rather than trusting any cached
/// list.
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> ApiResult<Response> {
    let url = params.url.unwrap_or_default();
    let itag = params.itag.unwrap_or_default();
    if !state.extractor.is_valid_url(&url) || itag.is_empty() {
        return Err(ApiError::invalid_input("invalid URL or format"));
    }

    // Liveness check: confirm the video still resolves. The metadata itself
    // is discarded.
    state
        .extractor
        .video_info(&url)
        .await
        .map_err(|err| upstream(err, "error downloading video"))?;

    // Open the upstream stream before committing the response, so a failure
    // here still yields a clean JSON error instead of a truncated 200. A
    // failure after bytes start flowing can only truncate the connection.
    let stream = state
        .extractor
        .open_stream(&url, &itag)
        .await
        .map_err(|err| upstream(err, "error downloading video"))?;

    let mut response = Body::from_stream(stream).into_response();
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"video.mp4\""),
    );
    Ok(response)
}

// Collaborator failures map to a generic 500; the detail is logged here and
// never leaked into the response body.
fn upstream(err: ExtractError, message: &str) -> ApiError {
    error!("upstream extraction failed: {}", err);
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.to_string(),
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates a 400 error with the provided message.
    fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
