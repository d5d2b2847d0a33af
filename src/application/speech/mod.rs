//! 发声 - 预录音频与合成语音的回退链
//!
//! 包含：
//! - audio_source: 预录音频的解析、加载（带缓存）与播放
//! - backend: 两种发声后端的统一接口
//! - chain: 按顺序尝试后端的回退链

mod audio_source;
mod backend;
mod chain;

pub use audio_source::{AudioError, AudioSource, ClipLibrary};
pub use backend::{BackendFailure, BackendKind, SoundBackend, SoundParams};
pub use chain::{AnnounceOutcome, SpeechFallbackChain};
