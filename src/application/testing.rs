//! 测试用端口替身

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    AudioClip, AudioOutputPort, AudioProbePort, ClipInfo, ClipStoreError, ClipStorePort,
    OutputError, ProbeError, SessionAudio, SessionAudioFactoryPort, SpeechEnginePort,
    SpeechError, SpeechRequest,
};
use crate::application::speech::ClipLibrary;
use crate::domain::audio::ClipPath;
use crate::infrastructure::memory::InMemoryAudioCache;

const FAKE_MAGIC: &[u8] = b"FAKE";

/// 只认识给定路径的音频仓库
pub struct FakeClipStore {
    clips: HashSet<String>,
    corrupt: bool,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl FakeClipStore {
    pub fn with_clips(paths: &[&str]) -> Self {
        Self {
            clips: paths.iter().map(|p| p.to_string()).collect(),
            corrupt: false,
            delay: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn corrupt(mut self) -> Self {
        self.corrupt = true;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClipStorePort for FakeClipStore {
    async fn fetch(&self, path: &ClipPath) -> Result<Vec<u8>, ClipStoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if !self.clips.contains(path.as_str()) {
            return Err(ClipStoreError::NotFound(path.to_string()));
        }
        if self.corrupt {
            return Ok(b"garbage".to_vec());
        }
        let mut data = FAKE_MAGIC.to_vec();
        data.extend_from_slice(path.as_str().as_bytes());
        Ok(data)
    }
}

/// 只接受 FAKE 开头数据的探测器
pub struct FakeProbe;

impl AudioProbePort for FakeProbe {
    fn probe(&self, data: &[u8], _extension: Option<&str>) -> Result<ClipInfo, ProbeError> {
        if data.starts_with(FAKE_MAGIC) {
            Ok(ClipInfo {
                codec: "fake".into(),
                ..ClipInfo::default()
            })
        } else {
            Err(ProbeError::Decode("not a fake clip".into()))
        }
    }
}

pub fn library(store: Arc<FakeClipStore>) -> ClipLibrary {
    library_with_timeout(store, None)
}

pub fn library_with_timeout(store: Arc<FakeClipStore>, timeout: Option<Duration>) -> ClipLibrary {
    ClipLibrary::new(
        store,
        Arc::new(FakeProbe),
        Arc::new(InMemoryAudioCache::new()),
        "mp3",
        timeout,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    Play { path: String, rate: f32 },
    Halt,
}

/// 记录所有调用的播放输出
#[derive(Default)]
pub struct RecordingOutput {
    calls: Mutex<Vec<OutputCall>>,
}

impl RecordingOutput {
    pub fn calls(&self) -> Vec<OutputCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn played(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                OutputCall::Play { path, .. } => Some(path),
                OutputCall::Halt => None,
            })
            .collect()
    }
}

#[async_trait]
impl AudioOutputPort for RecordingOutput {
    async fn play(&self, clip: &AudioClip, rate: f32) -> Result<(), OutputError> {
        self.calls.lock().unwrap().push(OutputCall::Play {
            path: clip.path.to_string(),
            rate,
        });
        Ok(())
    }

    fn halt(&self) {
        self.calls.lock().unwrap().push(OutputCall::Halt);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCall {
    Speak(SpeechRequest),
    Cancel,
}

/// 记录所有调用的语音引擎
#[derive(Default)]
pub struct RecordingSpeech {
    calls: Mutex<Vec<SpeechCall>>,
    failing: bool,
}

impl RecordingSpeech {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SpeechCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SpeechCall::Speak(req) => Some(req.word),
                SpeechCall::Cancel => None,
            })
            .collect()
    }
}

impl SpeechEnginePort for RecordingSpeech {
    fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError> {
        if self.failing {
            return Err(SpeechError::Unavailable("test engine".into()));
        }
        self.calls.lock().unwrap().push(SpeechCall::Speak(request));
        Ok(())
    }

    fn cancel(&self) {
        self.calls.lock().unwrap().push(SpeechCall::Cancel);
    }
}

/// 所有会话共用同一组记录替身
#[derive(Default)]
pub struct RecordingAudioFactory {
    pub output: Arc<RecordingOutput>,
    pub speech: Arc<RecordingSpeech>,
}

impl SessionAudioFactoryPort for RecordingAudioFactory {
    fn create(&self, _session_id: &str) -> SessionAudio {
        SessionAudio {
            output: self.output.clone(),
            speech: self.speech.clone(),
        }
    }
}
