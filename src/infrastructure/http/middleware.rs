//! HTTP Middleware
//!
//! 每个请求一个 `request` span，字段：method / route / session_id。
//! 业务错误（errno != 0）在 `ApiError::into_response()` 中记录，日志落在该 span 内，
//! 这里只记录传输层的 4xx / 5xx（路由不存在、请求体解析失败、WebSocket 升级失败）。

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{field, Instrument, Level, Span};

/// 请求日志中间件
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        route = %route,
        session_id = field::Empty,
    );
    if let Some(session_id) = session_id_from_path(request.uri().path()) {
        span.record("session_id", session_id);
    }

    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    span.in_scope(|| match status_level(status) {
        Some(level) if level == Level::ERROR => {
            tracing::error!(status = status.as_u16(), elapsed_ms, "HTTP server error")
        }
        Some(_) => tracing::warn!(status = status.as_u16(), elapsed_ms, "HTTP client error"),
        None => tracing::debug!(status = status.as_u16(), elapsed_ms, "HTTP request completed"),
    });

    response
}

/// 在当前请求 span 上记录会话 ID
///
/// 会话 API 的 ID 在请求体里，由 handler 解析后调用
pub fn record_session_id(session_id: &str) {
    Span::current().record("session_id", session_id);
}

/// `/ws/session/{id}` 路径中的会话 ID
fn session_id_from_path(path: &str) -> Option<&str> {
    path.strip_prefix("/ws/session/")
        .map(|rest| rest.trim_end_matches('/'))
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

/// 需要单独记录的状态码及其级别，成功响应返回 None
fn status_level(status: StatusCode) -> Option<Level> {
    if status.is_server_error() {
        Some(Level::ERROR)
    } else if status.is_client_error() {
        Some(Level::WARN)
    } else {
        None
    }
}
