//! Word Pool Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GetWordPool;
use crate::infrastructure::http::dto::{ApiResponse, WordPoolRequest, WordPoolResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出年级词库（可按关键字过滤）
pub async fn list_words(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WordPoolRequest>,
) -> Result<Json<ApiResponse<WordPoolResponseDto>>, ApiError> {
    let result = state.get_word_pool_handler.handle(GetWordPool {
        grade: req.grade,
        search: req.search,
    });
    Ok(Json(ApiResponse::success(result.into())))
}
