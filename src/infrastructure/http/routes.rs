//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/words/list        POST  年级词库（可搜索）
//! - /api/voice/list        GET   可用音色
//! - /api/session/start     POST  开始听写（新建或复用会话）
//! - /api/session/get       POST  获取会话快照
//! - /api/session/pause     POST  暂停 / 继续
//! - /api/session/next      POST  下一个单词
//! - /api/session/previous  POST  上一个单词
//! - /api/session/repeat    POST  重复当前单词
//! - /api/session/stop      POST  停止听写
//! - /api/list/save         POST  保存单词表
//! - /api/list/load         POST  加载单词表
//! - /api/list/delete       POST  删除单词表
//! - /api/list/list         GET   列出单词表
//! - /api/clip/*path        GET   音频数据
//! - /ws/session/{id}       WS    会话 WebSocket（快照、播放、朗读事件）
//! - /ws/events             WS    全局 WebSocket（单词表事件）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/session/:session_id", get(handlers::websocket_handler))
        .route("/ws/events", get(handlers::global_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/words/list", post(handlers::list_words))
        .route("/voice/list", get(handlers::list_voices))
        .nest("/session", session_routes())
        .nest("/list", list_routes())
        .route("/clip/*path", get(handlers::get_clip))
}

/// Session 路由
fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start", post(handlers::start_session))
        .route("/get", post(handlers::get_session))
        .route("/pause", post(handlers::pause_session))
        .route("/next", post(handlers::next_word))
        .route("/previous", post(handlers::previous_word))
        .route("/repeat", post(handlers::repeat_word))
        .route("/stop", post(handlers::stop_session))
}

/// Word List 路由
fn list_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/save", post(handlers::save_list))
        .route("/load", post(handlers::load_list))
        .route("/delete", post(handlers::delete_list))
        .route("/list", get(handlers::list_lists))
}
