//! WebSocket Handler
//!
//! - /ws/session/{id}: 会话快照、播放与朗读事件
//! - /ws/events: 单词表变更事件

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::infrastructure::events::WsEvent;
use crate::infrastructure::http::state::AppState;

/// Session WebSocket 连接处理
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session_socket(socket, session_id, state))
}

/// 全局 WebSocket 连接处理
pub async fn global_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_global_socket(socket, state))
}

async fn send_event(sender: &mut SplitSink<WebSocket, Message>, event: &WsEvent) -> bool {
    let msg = match serde_json::to_string(event) {
        Ok(json) => Message::Text(json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize event");
            return true;
        }
    };

    match sender.send(msg).await {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to send WebSocket message");
            false
        }
    }
}

async fn handle_session_socket(socket: WebSocket, session_id: String, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // 验证会话存在
    let handle = match state.session_manager.get(&session_id) {
        Ok(handle) => handle,
        Err(_) => {
            tracing::warn!(session_id = %session_id, "WebSocket connection rejected: invalid session");
            let _ = sender.close().await;
            return;
        }
    };

    let mut event_rx = state.event_publisher.register_session(&session_id);
    let mut snapshots = handle.subscribe();

    tracing::info!(session_id = %session_id, "WebSocket connected");

    let session_id_for_forward = session_id.clone();
    let session_id_for_receive = session_id.clone();

    // 快照与事件转发任务
    let forward_task = tokio::spawn(async move {
        let session_id = session_id_for_forward;

        let initial = snapshots.borrow_and_update().clone();
        let mut was_completed = initial.completed;
        if let Some(event) = WsEvent::session_state(&session_id, &initial) {
            if !send_event(&mut sender, &event).await {
                return;
            }
        }

        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        // 会话 actor 已结束
                        break;
                    }
                    let snapshot = snapshots.borrow_and_update().clone();
                    if let Some(event) = WsEvent::session_state(&session_id, &snapshot) {
                        if !send_event(&mut sender, &event).await {
                            break;
                        }
                    }
                    if snapshot.completed && !was_completed {
                        let event = WsEvent::session_completed(&session_id, &snapshot);
                        if !send_event(&mut sender, &event).await {
                            break;
                        }
                    }
                    was_completed = snapshot.completed;
                }
                event = event_rx.recv() => {
                    match event {
                        Ok(event) => {
                            let closed = matches!(event, WsEvent::SessionClosed { .. });
                            if !send_event(&mut sender, &event).await || closed {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(session_id = %session_id, skipped, "WebSocket event stream lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        }

        let _ = sender.close().await;
    });

    // 接收客户端消息（心跳）
    let session_manager = state.session_manager.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id_for_receive, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(session_id = %session_id_for_receive, error = %e, "WebSocket error");
                    break;
                }
                _ => {
                    // 任何客户端消息都视为活动
                    session_manager.touch(&session_id_for_receive);
                }
            }
        }
    });

    first_finished(forward_task, receive_task).await;

    tracing::info!(session_id = %session_id, "WebSocket disconnected");
}

/// 处理全局 WebSocket（单词表事件）
async fn handle_global_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let mut event_rx = state.event_publisher.subscribe_global();

    tracing::info!("Global WebSocket connected");

    let forward_task = tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => {
                    if !send_event(&mut sender, &event).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Global WebSocket event stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Global WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Global WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    first_finished(forward_task, receive_task).await;

    tracing::info!("Global WebSocket disconnected");
}

/// 等待任一任务结束，并中止另一个
async fn first_finished(mut forward: JoinHandle<()>, mut receive: JoinHandle<()>) {
    tokio::select! {
        _ = &mut forward => receive.abort(),
        _ = &mut receive => forward.abort(),
    }
}
