//! Word List Handlers - 单词表的保存、加载、删除

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{DeleteWordList, ListWordLists, LoadWordList, SaveWordList};
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, ListNameRequest, SaveListRequest, WordListResponse, WordListSummaryDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 保存单词表
///
/// 同名单词表已存在且未设置 `overwrite` 时返回 409
pub async fn save_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveListRequest>,
) -> Result<Json<ApiResponse<WordListResponse>>, ApiError> {
    let cmd = SaveWordList {
        name: req.name,
        words: req.words,
        grade: req.grade,
        overwrite: req.overwrite,
    };

    let saved = state.save_word_list_handler.handle(cmd).await?;
    state
        .event_publisher
        .publish_word_list_saved(saved.name().as_str(), &saved.summary());

    Ok(Json(ApiResponse::success(saved.into())))
}

pub async fn load_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListNameRequest>,
) -> Result<Json<ApiResponse<WordListResponse>>, ApiError> {
    let list = state
        .load_word_list_handler
        .handle(LoadWordList { name: req.name })
        .await?;
    Ok(Json(ApiResponse::success(list.into())))
}

pub async fn delete_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListNameRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let name = req.name.trim().to_string();
    state
        .delete_word_list_handler
        .handle(DeleteWordList { name: name.clone() })
        .await?;
    state.event_publisher.publish_word_list_deleted(&name);

    Ok(Json(ApiResponse::ok()))
}

/// 列出所有单词表（按名称排序）
pub async fn list_lists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<WordListSummaryDto>>>, ApiError> {
    let lists = state.list_word_lists_handler.handle(ListWordLists).await?;
    Ok(Json(ApiResponse::success(
        lists.into_iter().map(Into::into).collect(),
    )))
}
