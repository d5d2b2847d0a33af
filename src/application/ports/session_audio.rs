//! Session Audio Port - 为每个会话创建声音出口

use std::sync::Arc;

use super::{AudioOutputPort, SpeechEnginePort};

/// 单个会话的声音出口
#[derive(Clone)]
pub struct SessionAudio {
    pub output: Arc<dyn AudioOutputPort>,
    pub speech: Arc<dyn SpeechEnginePort>,
}

/// Session Audio Factory Port
pub trait SessionAudioFactoryPort: Send + Sync {
    fn create(&self, session_id: &str) -> SessionAudio;
}
