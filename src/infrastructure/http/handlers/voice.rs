//! Voice Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{ApiResponse, VoiceListDto};
use crate::infrastructure::http::state::AppState;

/// 列出可用音色及默认音色
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<VoiceListDto>> {
    Json(ApiResponse::success(
        state.list_voices_handler.handle(ListVoices).into(),
    ))
}
