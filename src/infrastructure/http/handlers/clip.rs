//! Clip Handler - 输出已缓存的音频

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::GetClip;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn get_clip(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.get_clip_handler.handle(GetClip { path }).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.data.len())
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from(result.data))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
