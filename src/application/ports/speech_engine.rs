//! Speech Engine Port - 合成语音
//!
//! 提交即返回（fire-and-forget），不等待朗读完成

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),
}

/// 朗读请求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub word: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub voice_id: Option<String>,
}

impl SpeechRequest {
    pub fn new(word: impl Into<String>, rate: f32, voice_id: Option<String>) -> Self {
        Self {
            word: word.into(),
            rate,
            pitch: 1.0,
            volume: 1.0,
            voice_id,
        }
    }
}

/// Speech Engine Port
pub trait SpeechEnginePort: Send + Sync {
    /// 取消进行中的合成，然后提交新的朗读
    fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError>;

    /// 取消进行中的合成
    fn cancel(&self);
}
