//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::application::ports::SpeechRequest;
use crate::domain::session::SessionSnapshot;

const CHANNEL_CAPACITY: usize = 100;

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 会话快照变更
    SessionState {
        session_id: String,
        snapshot: serde_json::Value,
    },
    /// 听写完成
    SessionCompleted { session_id: String, text: String },
    /// 会话关闭
    SessionClosed { session_id: String, reason: String },
    /// 播放预录音频（先停止 `playback_id` 之前的播放）
    PlayClip {
        session_id: String,
        playback_id: u64,
        url: String,
        rate: f32,
    },
    /// 停止播放
    HaltPlayback { session_id: String, playback_id: u64 },
    /// 由客户端语音引擎朗读（先取消正在进行的朗读）
    Speak {
        session_id: String,
        word: String,
        rate: f32,
        pitch: f32,
        volume: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        voice_id: Option<String>,
    },
    /// 取消客户端朗读
    CancelSpeech { session_id: String },
    /// 单词表已保存
    WordListSaved { name: String, summary: String },
    /// 单词表已删除
    WordListDeleted { name: String },
}

impl WsEvent {
    /// 会话快照事件，序列化失败时返回 None
    pub fn session_state(session_id: &str, snapshot: &SessionSnapshot) -> Option<Self> {
        match serde_json::to_value(snapshot) {
            Ok(snapshot) => Some(Self::SessionState {
                session_id: session_id.to_string(),
                snapshot,
            }),
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to encode snapshot");
                None
            }
        }
    }

    /// 听写完成事件
    pub fn session_completed(session_id: &str, snapshot: &SessionSnapshot) -> Self {
        Self::SessionCompleted {
            session_id: session_id.to_string(),
            text: snapshot.display_text.clone(),
        }
    }
}

/// 事件发布器
pub struct EventPublisher {
    /// session_id -> broadcast sender (for session-specific events)
    session_channels: DashMap<String, broadcast::Sender<WsEvent>>,
    /// Global broadcast channel for word list events
    global_channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (global_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            session_channels: DashMap::new(),
            global_channel: global_tx,
        }
    }

    /// 订阅全局事件
    pub fn subscribe_global(&self) -> broadcast::Receiver<WsEvent> {
        self.global_channel.subscribe()
    }

    /// 注册会话的事件通道（已存在时复用）
    pub fn register_session(&self, session_id: &str) -> broadcast::Receiver<WsEvent> {
        self.session_channels
            .entry(session_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// 取消注册会话
    pub fn unregister_session(&self, session_id: &str) {
        self.session_channels.remove(session_id);
    }

    /// 获取会话的事件接收器
    pub fn subscribe(&self, session_id: &str) -> Option<broadcast::Receiver<WsEvent>> {
        self.session_channels.get(session_id).map(|s| s.subscribe())
    }

    /// 发布会话关闭事件
    pub fn publish_session_closed(&self, session_id: &str, reason: &str) {
        self.publish_to_session(
            session_id,
            WsEvent::SessionClosed {
                session_id: session_id.to_string(),
                reason: reason.to_string(),
            },
        );
    }

    /// 发布播放事件
    pub fn publish_play_clip(&self, session_id: &str, playback_id: u64, url: String, rate: f32) {
        self.publish_to_session(
            session_id,
            WsEvent::PlayClip {
                session_id: session_id.to_string(),
                playback_id,
                url,
                rate,
            },
        );
    }

    /// 发布停止播放事件
    pub fn publish_halt_playback(&self, session_id: &str, playback_id: u64) {
        self.publish_to_session(
            session_id,
            WsEvent::HaltPlayback {
                session_id: session_id.to_string(),
                playback_id,
            },
        );
    }

    /// 发布朗读事件
    pub fn publish_speak(&self, session_id: &str, request: &SpeechRequest) {
        self.publish_to_session(
            session_id,
            WsEvent::Speak {
                session_id: session_id.to_string(),
                word: request.word.clone(),
                rate: request.rate,
                pitch: request.pitch,
                volume: request.volume,
                voice_id: request.voice_id.clone(),
            },
        );
    }

    /// 发布取消朗读事件
    pub fn publish_cancel_speech(&self, session_id: &str) {
        self.publish_to_session(
            session_id,
            WsEvent::CancelSpeech {
                session_id: session_id.to_string(),
            },
        );
    }

    /// 发布单词表保存事件（全局广播）
    pub fn publish_word_list_saved(&self, name: &str, summary: &str) {
        self.publish_global(WsEvent::WordListSaved {
            name: name.to_string(),
            summary: summary.to_string(),
        });
    }

    /// 发布单词表删除事件（全局广播）
    pub fn publish_word_list_deleted(&self, name: &str) {
        self.publish_global(WsEvent::WordListDeleted {
            name: name.to_string(),
        });
    }

    fn publish_global(&self, event: WsEvent) {
        if let Err(e) = self.global_channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish global event (no receivers)");
        }
    }

    /// 发布事件到指定会话
    fn publish_to_session(&self, session_id: &str, event: WsEvent) {
        if let Some(sender) = self.session_channels.get(session_id) {
            if let Err(e) = sender.send(event) {
                tracing::debug!(
                    session_id = %session_id,
                    error = %e,
                    "Failed to publish event (no receivers)"
                );
            }
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
