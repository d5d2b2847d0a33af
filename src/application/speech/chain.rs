//! SpeechFallbackChain - 按顺序尝试发声后端

use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::SpeechEnginePort;

use super::{AudioSource, BackendKind, SoundBackend, SoundParams};

/// 一次朗读的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "backend", rename_all = "snake_case")]
pub enum AnnounceOutcome {
    Produced(BackendKind),
    /// 所有后端都失败
    Silent,
}

/// 发声回退链
///
/// 每次 announce 前停止所有后端的声音，之后至多一个后端发声
#[derive(Clone)]
pub struct SpeechFallbackChain {
    backends: Vec<SoundBackend>,
}

impl SpeechFallbackChain {
    /// 预录模式下先尝试预录音频，失败回退到合成语音；否则只用合成语音
    pub fn new(source: AudioSource, speech: Arc<dyn SpeechEnginePort>, pre_rendered: bool) -> Self {
        let mut backends = Vec::with_capacity(2);
        if pre_rendered {
            backends.push(SoundBackend::PreRendered(source));
        }
        backends.push(SoundBackend::Synthesized(speech));
        Self { backends }
    }

    pub fn backends(&self) -> impl Iterator<Item = BackendKind> + '_ {
        self.backends.iter().map(SoundBackend::kind)
    }

    /// 停止所有后端的声音
    pub fn silence(&self) {
        for backend in &self.backends {
            backend.silence();
        }
    }

    /// 朗读单词，从不返回错误
    pub async fn announce(&self, word: &str, params: &SoundParams) -> AnnounceOutcome {
        self.silence();

        for backend in &self.backends {
            match backend.produce(word, params).await {
                Ok(kind) => return AnnounceOutcome::Produced(kind),
                Err(failure) => {
                    tracing::warn!(
                        word = %word,
                        backend = %failure.kind,
                        reason = %failure.reason,
                        "Sound backend failed, falling back"
                    );
                }
            }
        }

        tracing::warn!(word = %word, "No sound backend produced audio");
        AnnounceOutcome::Silent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SpeechRequest;
    use crate::application::testing::{
        library, FakeClipStore, OutputCall, RecordingOutput, RecordingSpeech, SpeechCall,
    };
    use crate::domain::session::SpeechRate;
    use crate::domain::words::GradeLevel;

    fn params() -> SoundParams {
        SoundParams {
            grade: GradeLevel::Gr23,
            rate: SpeechRate::new(1.25).unwrap(),
            voice_id: Some("sam".into()),
        }
    }

    fn chain_with(
        clips: &[&str],
        pre_rendered: bool,
    ) -> (SpeechFallbackChain, Arc<RecordingOutput>, Arc<RecordingSpeech>) {
        let output = Arc::new(RecordingOutput::default());
        let speech = Arc::new(RecordingSpeech::default());
        let source = AudioSource::new(
            Arc::new(library(Arc::new(FakeClipStore::with_clips(clips)))),
            output.clone(),
        );
        let chain = SpeechFallbackChain::new(source, speech.clone(), pre_rendered);
        (chain, output, speech)
    }

    #[tokio::test]
    async fn test_pre_rendered_success_does_not_speak() {
        let (chain, output, speech) = chain_with(&["audio/gr23/cat.mp3"], true);

        let outcome = chain.announce("cat", &params()).await;

        assert_eq!(outcome, AnnounceOutcome::Produced(BackendKind::PreRendered));
        assert!(speech.spoken().is_empty());
        assert_eq!(output.played(), vec!["audio/gr23/cat.mp3".to_string()]);
        assert!(output.calls().contains(&OutputCall::Play {
            path: "audio/gr23/cat.mp3".into(),
            rate: 1.25
        }));
    }

    #[tokio::test]
    async fn test_clip_failure_falls_back_to_exactly_one_speak() {
        let (chain, output, speech) = chain_with(&[], true);

        let outcome = chain.announce("cat", &params()).await;

        assert_eq!(outcome, AnnounceOutcome::Produced(BackendKind::Synthesized));
        assert!(output.played().is_empty());
        assert_eq!(
            speech.calls(),
            vec![
                SpeechCall::Cancel,
                SpeechCall::Speak(SpeechRequest::new("cat", 1.25, Some("sam".into()))),
            ]
        );
    }

    #[tokio::test]
    async fn test_disabled_pre_rendered_speaks_directly() {
        let (chain, output, speech) = chain_with(&["audio/gr23/cat.mp3"], false);

        let outcome = chain.announce("cat", &params()).await;

        assert_eq!(outcome, AnnounceOutcome::Produced(BackendKind::Synthesized));
        assert!(output.played().is_empty());
        assert_eq!(speech.spoken(), vec!["cat".to_string()]);
        assert_eq!(chain.backends().collect::<Vec<_>>(), vec![BackendKind::Synthesized]);
    }

    #[tokio::test]
    async fn test_announce_silences_previous_sound_first() {
        let (chain, output, speech) = chain_with(&["audio/gr23/cat.mp3"], true);

        chain.announce("cat", &params()).await;

        assert_eq!(output.calls().first(), Some(&OutputCall::Halt));
        assert_eq!(speech.calls().first(), Some(&SpeechCall::Cancel));
    }

    #[tokio::test]
    async fn test_all_backends_failing_is_silent() {
        let output = Arc::new(RecordingOutput::default());
        let speech = Arc::new(RecordingSpeech::failing());
        let source = AudioSource::new(
            Arc::new(library(Arc::new(FakeClipStore::with_clips(&[])))),
            output,
        );
        let chain = SpeechFallbackChain::new(source, speech, true);

        assert_eq!(chain.announce("cat", &params()).await, AnnounceOutcome::Silent);
    }
}
