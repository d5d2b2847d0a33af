//! TTS Speech Engine - 服务端合成语音
//!
//! 合成结果按 (word, voice, rate) 缓存，经会话的音频输出播放

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::application::ports::{
    speech_cache_key, AudioCachePort, AudioClip, AudioOutputPort, AudioProbePort, ClipInfo,
    SpeechEnginePort, SpeechError, SpeechRequest, SynthesisRequest, TtsEnginePort,
};

pub struct TtsSpeechEngine {
    tts: Arc<dyn TtsEnginePort>,
    cache: Arc<dyn AudioCachePort>,
    probe: Arc<dyn AudioProbePort>,
    output: Arc<dyn AudioOutputPort>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TtsSpeechEngine {
    pub fn new(
        tts: Arc<dyn TtsEnginePort>,
        cache: Arc<dyn AudioCachePort>,
        probe: Arc<dyn AudioProbePort>,
        output: Arc<dyn AudioOutputPort>,
    ) -> Self {
        Self {
            tts,
            cache,
            probe,
            output,
            task: Mutex::new(None),
        }
    }

    fn abort_pending(&self) {
        let pending = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}

impl SpeechEnginePort for TtsSpeechEngine {
    fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError> {
        if request.word.trim().is_empty() {
            return Err(SpeechError::Unavailable("empty utterance".to_string()));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SpeechError::Unavailable(e.to_string()))?;

        self.cancel();

        let tts = self.tts.clone();
        let cache = self.cache.clone();
        let probe = self.probe.clone();
        let output = self.output.clone();

        let task = runtime.spawn(async move {
            let key = speech_cache_key(&request.word, request.voice_id.as_deref(), request.rate);

            let clip = match cache.get(&key) {
                Some(clip) => clip,
                None => {
                    let synthesis = SynthesisRequest {
                        text: request.word.clone(),
                        voice_id: request.voice_id.clone(),
                        speed: request.rate,
                    };
                    let response = match tts.synthesize(synthesis).await {
                        Ok(response) => response,
                        Err(e) => {
                            tracing::warn!(word = %request.word, error = %e, "Speech synthesis failed");
                            return;
                        }
                    };

                    let info = probe.probe(&response.audio_data, Some("wav")).unwrap_or_else(|e| {
                        tracing::debug!(error = %e, "Probe failed for synthesized speech");
                        ClipInfo {
                            codec: "unknown".to_string(),
                            sample_rate: response.sample_rate,
                            channels: None,
                            duration_ms: response.duration_ms,
                        }
                    });
                    let clip = AudioClip::new(key, response.audio_data, info);
                    cache.put(clip.clone());
                    clip
                }
            };

            // 语速已在合成时应用
            if let Err(e) = output.play(&clip, 1.0).await {
                tracing::warn!(word = %request.word, error = %e, "Synthesized speech playback failed");
            }
        });

        *self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(task);
        Ok(())
    }

    fn cancel(&self) {
        self.abort_pending();
        self.output.halt();
    }
}

impl Drop for TtsSpeechEngine {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{OutputCall, RecordingOutput};
    use crate::infrastructure::adapters::probe::SymphoniaProbe;
    use crate::infrastructure::adapters::tts::{FakeTtsClient, FakeTtsClientConfig};
    use crate::infrastructure::memory::InMemoryAudioCache;
    use std::time::Duration;

    fn engine(latency_ms: u64) -> (TtsSpeechEngine, Arc<RecordingOutput>, Arc<InMemoryAudioCache>) {
        let tts = FakeTtsClient::new(FakeTtsClientConfig {
            latency: Duration::from_millis(latency_ms),
            ..Default::default()
        });
        let output = Arc::new(RecordingOutput::default());
        let cache = Arc::new(InMemoryAudioCache::new());
        let engine = TtsSpeechEngine::new(
            Arc::new(tts),
            cache.clone(),
            Arc::new(SymphoniaProbe::new()),
            output.clone(),
        );
        (engine, output, cache)
    }

    #[tokio::test(start_paused = true)]
    async fn test_synthesizes_caches_and_plays() {
        let (engine, output, cache) = engine(100);

        engine.speak(SpeechRequest::new("cat", 1.0, None)).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        let key = speech_cache_key("cat", None, 1.0);
        assert!(cache.contains(&key));
        assert_eq!(output.played(), vec![key.as_str().to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_request_cancels_pending_synthesis() {
        let (engine, output, _cache) = engine(100);

        engine.speak(SpeechRequest::new("cat", 1.0, None)).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        engine.speak(SpeechRequest::new("dog", 1.0, None)).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        let dog = speech_cache_key("dog", None, 1.0);
        assert_eq!(output.played(), vec![dog.as_str().to_string()]);
        assert!(output.calls().contains(&OutputCall::Halt));
    }
}
