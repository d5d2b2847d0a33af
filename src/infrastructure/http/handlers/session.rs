//! Session Handlers - 听写会话控制

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ControlAction, ControlDictation, GetSession, StopDictation};
use crate::infrastructure::http::dto::{
    ApiResponse, SessionIdRequest, SessionResponse, StartSessionRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::record_session_id;
use crate::infrastructure::http::state::AppState;

type SessionResult = Result<Json<ApiResponse<SessionResponse>>, ApiError>;

/// 开始听写（可复用已有会话）
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartSessionRequest>,
) -> SessionResult {
    if let Some(session_id) = req.session_id.as_deref() {
        record_session_id(session_id);
    }
    let result = state.start_dictation_handler.handle(req.into()).await?;
    record_session_id(&result.session_id);
    Ok(Json(ApiResponse::success(result.into())))
}

/// 获取会话快照
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionIdRequest>,
) -> SessionResult {
    record_session_id(&req.session_id);
    let result = state.get_session_handler.handle(GetSession {
        session_id: req.session_id,
    })?;
    Ok(Json(ApiResponse::success(result.into())))
}

/// 暂停 / 继续
pub async fn pause_session(state: State<Arc<AppState>>, req: Json<SessionIdRequest>) -> SessionResult {
    control(state, req, ControlAction::TogglePause).await
}

pub async fn next_word(state: State<Arc<AppState>>, req: Json<SessionIdRequest>) -> SessionResult {
    control(state, req, ControlAction::Next).await
}

pub async fn previous_word(state: State<Arc<AppState>>, req: Json<SessionIdRequest>) -> SessionResult {
    control(state, req, ControlAction::Previous).await
}

pub async fn repeat_word(state: State<Arc<AppState>>, req: Json<SessionIdRequest>) -> SessionResult {
    control(state, req, ControlAction::Repeat).await
}

/// 停止听写，会话回到 Idle 并可重新开始
pub async fn stop_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionIdRequest>,
) -> SessionResult {
    record_session_id(&req.session_id);
    let result = state
        .stop_dictation_handler
        .handle(StopDictation {
            session_id: req.session_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(result.into())))
}

async fn control(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionIdRequest>,
    action: ControlAction,
) -> SessionResult {
    record_session_id(&req.session_id);
    let result = state
        .control_dictation_handler
        .handle(ControlDictation {
            session_id: req.session_id,
            action,
        })
        .await?;
    Ok(Json(ApiResponse::success(result.into())))
}
