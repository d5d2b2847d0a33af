//! Speech Adapters - 合成语音引擎与会话声音出口
//!
//! - client: 由浏览器端语音合成朗读（推送 Speak 事件）
//! - tts: 由服务端 TTS 合成后作为音频播放

mod client_speech;
mod session_audio_factory;
mod tts_speech;

pub use client_speech::ClientSpeechEngine;
pub use session_audio_factory::{EventSessionAudioFactory, SpeechBackendConfig};
pub use tts_speech::TtsSpeechEngine;
