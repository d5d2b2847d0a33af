//! Event Audio Output - 以 WebSocket 播放事件实现的音频输出
//!
//! 实现 AudioOutputPort trait：播放 = 发布 PlayClip，停止 = 发布 HaltPlayback

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::{AudioClip, AudioOutputPort, OutputError};

use super::EventPublisher;

/// 单个会话的事件音频输出
///
/// `current` 为 0 表示没有正在进行的播放
pub struct EventAudioOutput {
    session_id: String,
    publisher: Arc<EventPublisher>,
    /// 音频 URL 前缀，如 `http://host:port/api/clip`
    clip_base_url: String,
    next_id: AtomicU64,
    current: AtomicU64,
}

impl EventAudioOutput {
    pub fn new(
        session_id: impl Into<String>,
        publisher: Arc<EventPublisher>,
        clip_base_url: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            publisher,
            clip_base_url: clip_base_url.into(),
            next_id: AtomicU64::new(1),
            current: AtomicU64::new(0),
        }
    }

    fn clip_url(&self, clip: &AudioClip) -> String {
        format!(
            "{}/{}",
            self.clip_base_url.trim_end_matches('/'),
            clip.path.as_str()
        )
    }
}

#[async_trait]
impl AudioOutputPort for EventAudioOutput {
    async fn play(&self, clip: &AudioClip, rate: f32) -> Result<(), OutputError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(OutputError::Rejected(format!("invalid rate: {}", rate)));
        }

        let playback_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let previous = self.current.swap(playback_id, Ordering::SeqCst);
        if previous != 0 {
            self.publisher.publish_halt_playback(&self.session_id, previous);
        }

        self.publisher
            .publish_play_clip(&self.session_id, playback_id, self.clip_url(clip), rate);

        tracing::debug!(
            session_id = %self.session_id,
            playback_id,
            path = %clip.path,
            rate,
            "Playback started"
        );

        Ok(())
    }

    fn halt(&self) {
        let previous = self.current.swap(0, Ordering::SeqCst);
        if previous != 0 {
            self.publisher.publish_halt_playback(&self.session_id, previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ClipInfo;
    use crate::domain::audio::ClipPath;
    use crate::infrastructure::events::WsEvent;

    fn clip(path: &str) -> AudioClip {
        AudioClip::new(ClipPath::from_key(path), vec![1, 2, 3], ClipInfo::default())
    }

    #[tokio::test]
    async fn test_new_playback_halts_previous() {
        let publisher = Arc::new(EventPublisher::new());
        let mut rx = publisher.register_session("s1");
        let output = EventAudioOutput::new("s1", publisher.clone(), "http://localhost:5060/api/clip/");

        output.play(&clip("audio/gr23/cat.mp3"), 1.0).await.unwrap();
        output.play(&clip("audio/gr23/dog.mp3"), 0.75).await.unwrap();
        output.halt();
        output.halt();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        assert_eq!(events.len(), 4);
        assert!(matches!(
            &events[0],
            WsEvent::PlayClip { playback_id: 1, url, .. } if url == "http://localhost:5060/api/clip/audio/gr23/cat.mp3"
        ));
        assert!(matches!(events[1], WsEvent::HaltPlayback { playback_id: 1, .. }));
        assert!(matches!(events[2], WsEvent::PlayClip { playback_id: 2, rate, .. } if rate == 0.75));
        assert!(matches!(events[3], WsEvent::HaltPlayback { playback_id: 2, .. }));
    }

    #[tokio::test]
    async fn test_rejects_invalid_rate() {
        let output = EventAudioOutput::new("s1", Arc::new(EventPublisher::new()), "/api/clip");
        assert!(output.play(&clip("audio/gr23/cat.mp3"), 0.0).await.is_err());
    }
}
