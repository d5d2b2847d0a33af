//! Client Speech Engine - 浏览器端语音合成
//!
//! 朗读请求以 WebSocket 事件推送给会话的观察者，由客户端的 speechSynthesis 执行

use std::sync::Arc;

use crate::application::ports::{SpeechEnginePort, SpeechError, SpeechRequest};
use crate::infrastructure::events::EventPublisher;

pub struct ClientSpeechEngine {
    session_id: String,
    publisher: Arc<EventPublisher>,
}

impl ClientSpeechEngine {
    pub fn new(session_id: impl Into<String>, publisher: Arc<EventPublisher>) -> Self {
        Self {
            session_id: session_id.into(),
            publisher,
        }
    }
}

impl SpeechEnginePort for ClientSpeechEngine {
    fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError> {
        if request.word.trim().is_empty() {
            return Err(SpeechError::Unavailable("empty utterance".to_string()));
        }

        // 客户端收到 Speak 时先取消正在进行的朗读
        self.publisher.publish_speak(&self.session_id, &request);
        Ok(())
    }

    fn cancel(&self) {
        self.publisher.publish_cancel_speech(&self.session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::events::WsEvent;

    #[test]
    fn test_speak_and_cancel_publish_events() {
        let publisher = Arc::new(EventPublisher::new());
        let mut rx = publisher.register_session("s1");
        let engine = ClientSpeechEngine::new("s1", publisher);

        engine
            .speak(SpeechRequest::new("dog", 0.75, Some("samantha".into())))
            .unwrap();
        engine.cancel();

        assert!(matches!(
            rx.try_recv().unwrap(),
            WsEvent::Speak { word, rate, voice_id: Some(v), .. } if word == "dog" && rate == 0.75 && v == "samantha"
        ));
        assert!(matches!(rx.try_recv().unwrap(), WsEvent::CancelSpeech { .. }));
    }

    #[test]
    fn test_blank_word_is_rejected() {
        let engine = ClientSpeechEngine::new("s1", Arc::new(EventPublisher::new()));
        assert!(engine.speak(SpeechRequest::new("  ", 1.0, None)).is_err());
    }
}
