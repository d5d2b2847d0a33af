//! AudioSource - 预录音频后端

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::application::ports::{
    AudioCachePort, AudioClip, AudioOutputPort, AudioProbePort, ClipStorePort,
};
use crate::domain::audio::ClipPath;
use crate::domain::words::GradeLevel;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio unavailable: {path} ({reason})")]
    Unavailable { path: String, reason: String },

    #[error("Playback failed: {0}")]
    Playback(String),
}

impl AudioError {
    fn unavailable(path: &ClipPath, reason: impl ToString) -> Self {
        Self::Unavailable {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// 预录音频库 - 所有会话共享
///
/// 负责路径解析和加载，加载成功的音频写入缓存后不再重复读取
pub struct ClipLibrary {
    store: Arc<dyn ClipStorePort>,
    probe: Arc<dyn AudioProbePort>,
    cache: Arc<dyn AudioCachePort>,
    extension: String,
    load_timeout: Option<Duration>,
}

impl ClipLibrary {
    pub fn new(
        store: Arc<dyn ClipStorePort>,
        probe: Arc<dyn AudioProbePort>,
        cache: Arc<dyn AudioCachePort>,
        extension: impl Into<String>,
        load_timeout: Option<Duration>,
    ) -> Self {
        Self {
            store,
            probe,
            cache,
            extension: extension.into(),
            load_timeout,
        }
    }

    pub fn resolve(&self, word: &str, grade: GradeLevel) -> ClipPath {
        ClipPath::resolve(word, grade, &self.extension)
    }

    /// 只读缓存，不触发加载
    pub fn cached(&self, path: &ClipPath) -> Option<AudioClip> {
        self.cache.get(path)
    }

    /// 加载音频
    ///
    /// 缓存命中直接返回；否则读取并探测，成功后写入缓存
    pub async fn load(&self, path: &ClipPath) -> Result<AudioClip, AudioError> {
        if let Some(clip) = self.cache.get(path) {
            return Ok(clip);
        }

        let fetch = self.store.fetch(path);
        let data = match self.load_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| AudioError::unavailable(path, "load timed out"))?,
            None => fetch.await,
        }
        .map_err(|e| AudioError::unavailable(path, e))?;

        let info = self
            .probe
            .probe(&data, path.extension())
            .map_err(|e| AudioError::unavailable(path, e))?;

        let clip = AudioClip::new(path.clone(), data, info);
        self.cache.put(clip.clone());

        tracing::debug!(
            path = %path,
            size_bytes = clip.size_bytes(),
            "Audio clip loaded"
        );

        Ok(clip)
    }
}

/// 单个会话的预录音频后端
#[derive(Clone)]
pub struct AudioSource {
    library: Arc<ClipLibrary>,
    output: Arc<dyn AudioOutputPort>,
}

impl AudioSource {
    pub fn new(library: Arc<ClipLibrary>, output: Arc<dyn AudioOutputPort>) -> Self {
        Self { library, output }
    }

    pub fn resolve(&self, word: &str, grade: GradeLevel) -> ClipPath {
        self.library.resolve(word, grade)
    }

    pub async fn load(&self, path: &ClipPath) -> Result<AudioClip, AudioError> {
        self.library.load(path).await
    }

    /// 播放（先停止当前播放），开始后返回
    pub async fn play(&self, clip: &AudioClip, rate: f32) -> Result<(), AudioError> {
        self.output.halt();
        self.output
            .play(clip, rate)
            .await
            .map_err(|e| AudioError::Playback(e.to_string()))
    }

    pub fn halt(&self) {
        self.output.halt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{
        library, library_with_timeout, FakeClipStore, OutputCall, RecordingOutput,
    };

    #[tokio::test]
    async fn test_load_caches_clip() {
        let store = Arc::new(FakeClipStore::with_clips(&["audio/gr23/cat.mp3"]));
        let lib = library(store.clone());
        let path = lib.resolve("Cat", GradeLevel::Gr23);
        assert_eq!(path.as_str(), "audio/gr23/cat.mp3");

        let first = lib.load(&path).await.unwrap();
        let second = lib.load(&path).await.unwrap();

        assert_eq!(store.fetch_count(), 1);
        assert_eq!(first.data.as_ptr(), second.data.as_ptr());
        assert!(lib.cached(&path).is_some());
    }

    #[tokio::test]
    async fn test_missing_clip_is_unavailable() {
        let store = Arc::new(FakeClipStore::with_clips(&[]));
        let lib = library(store);
        let path = lib.resolve("dog", GradeLevel::Gr45);

        let err = lib.load(&path).await.unwrap_err();
        assert!(matches!(err, AudioError::Unavailable { ref path, .. } if path == "audio/gr45/dog.mp3"));
        assert!(lib.cached(&path).is_none());
    }

    #[tokio::test]
    async fn test_undecodable_clip_is_unavailable() {
        let store = Arc::new(FakeClipStore::with_clips(&["audio/gr23/cat.mp3"]).corrupt());
        let lib = library(store);
        let path = lib.resolve("cat", GradeLevel::Gr23);

        assert!(lib.load(&path).await.is_err());
        assert!(lib.cached(&path).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_deadline() {
        let store = Arc::new(
            FakeClipStore::with_clips(&["audio/gr23/cat.mp3"]).delayed(Duration::from_secs(30)),
        );
        let lib = library_with_timeout(store, Some(Duration::from_secs(5)));
        let path = lib.resolve("cat", GradeLevel::Gr23);

        let err = lib.load(&path).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_play_halts_previous_first() {
        let store = Arc::new(FakeClipStore::with_clips(&["audio/gr23/cat.mp3"]));
        let output = Arc::new(RecordingOutput::default());
        let source = AudioSource::new(Arc::new(library(store)), output.clone());

        let clip = source.load(&source.resolve("cat", GradeLevel::Gr23)).await.unwrap();
        source.play(&clip, 1.5).await.unwrap();

        assert_eq!(
            output.calls(),
            vec![
                OutputCall::Halt,
                OutputCall::Play {
                    path: "audio/gr23/cat.mp3".into(),
                    rate: 1.5
                }
            ]
        );
    }
}
