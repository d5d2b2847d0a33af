//! Event Session Audio Factory - 为每个会话创建事件驱动的声音出口

use std::sync::Arc;

use crate::application::ports::{
    AudioCachePort, AudioOutputPort, AudioProbePort, SessionAudio, SessionAudioFactoryPort,
    SpeechEnginePort, TtsEnginePort,
};
use crate::infrastructure::events::{EventAudioOutput, EventPublisher};

use super::{ClientSpeechEngine, TtsSpeechEngine};

/// 合成语音的执行位置
#[derive(Clone)]
pub enum SpeechBackendConfig {
    /// 浏览器端朗读
    Client,
    /// 服务端 TTS 合成
    Tts {
        tts: Arc<dyn TtsEnginePort>,
        cache: Arc<dyn AudioCachePort>,
        probe: Arc<dyn AudioProbePort>,
    },
}

pub struct EventSessionAudioFactory {
    publisher: Arc<EventPublisher>,
    clip_base_url: String,
    backend: SpeechBackendConfig,
}

impl EventSessionAudioFactory {
    pub fn new(
        publisher: Arc<EventPublisher>,
        clip_base_url: impl Into<String>,
        backend: SpeechBackendConfig,
    ) -> Self {
        Self {
            publisher,
            clip_base_url: clip_base_url.into(),
            backend,
        }
    }
}

impl SessionAudioFactoryPort for EventSessionAudioFactory {
    fn create(&self, session_id: &str) -> SessionAudio {
        // 通道在会话创建时建立，观察者连接前的事件被丢弃
        drop(self.publisher.register_session(session_id));

        let output: Arc<dyn AudioOutputPort> = Arc::new(EventAudioOutput::new(
            session_id,
            self.publisher.clone(),
            self.clip_base_url.clone(),
        ));

        let speech: Arc<dyn SpeechEnginePort> = match &self.backend {
            SpeechBackendConfig::Client => {
                Arc::new(ClientSpeechEngine::new(session_id, self.publisher.clone()))
            }
            SpeechBackendConfig::Tts { tts, cache, probe } => Arc::new(TtsSpeechEngine::new(
                tts.clone(),
                cache.clone(),
                probe.clone(),
                output.clone(),
            )),
        };

        tracing::debug!(session_id = %session_id, "Session audio created");

        SessionAudio { output, speech }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_registers_session_channel() {
        let publisher = Arc::new(EventPublisher::new());
        let factory =
            EventSessionAudioFactory::new(publisher.clone(), "/api/clip", SpeechBackendConfig::Client);

        assert!(publisher.subscribe("s1").is_none());
        let _audio = factory.create("s1");
        assert!(publisher.subscribe("s1").is_some());
    }
}
