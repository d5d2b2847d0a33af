//! Ping Handler - 存活检查，附带词库与会话概况

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::words::GradeLevel;
use crate::infrastructure::http::state::AppState;

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub word_pools: Vec<PoolSize>,
}

#[derive(Serialize)]
pub struct PoolSize {
    pub grade: GradeLevel,
    pub words: usize,
}

pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let word_pools = GradeLevel::ALL
        .into_iter()
        .map(|grade| PoolSize {
            grade,
            words: state.get_word_pool_handler.pool_size(grade),
        })
        .collect();

    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.session_manager.list_all().len(),
        word_pools,
    })
}
