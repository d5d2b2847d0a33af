//! Events - WebSocket 事件推送
//!
//! - publisher: 会话事件通道与全局事件通道
//! - audio_output: 以播放事件实现的会话音频输出

mod audio_output;
mod publisher;

pub use audio_output::EventAudioOutput;
pub use publisher::{EventPublisher, WsEvent};
