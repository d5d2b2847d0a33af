//! 路由测试用的 AppState

use std::sync::Arc;

use crate::application::testing::{library, FakeClipStore};
use crate::application::{DictationDefaults, DictationEngine};
use crate::domain::audio::VoiceProfile;
use crate::infrastructure::adapters::{EventSessionAudioFactory, SpeechBackendConfig, StaticWordPool};
use crate::infrastructure::events::EventPublisher;
use crate::infrastructure::memory::InMemorySessionManager;
use crate::infrastructure::persistence::SledWordListRepository;

use super::state::AppState;

pub struct TestState {
    pub state: Arc<AppState>,
    _dir: tempfile::TempDir,
}

/// 只有 `audio/gr23/cat.mp3` 一个预录音频，客户端朗读，单词表存于临时目录
pub fn test_state() -> TestState {
    let dir = tempfile::tempdir().unwrap();
    let publisher = Arc::new(EventPublisher::new());
    let library = Arc::new(library(Arc::new(FakeClipStore::with_clips(&[
        "audio/gr23/cat.mp3",
    ]))));
    let engine = Arc::new(DictationEngine::new(
        library.clone(),
        Arc::new(EventSessionAudioFactory::new(
            publisher.clone(),
            "http://localhost:5060/api/clip",
            SpeechBackendConfig::Client,
        )),
    ));
    let voices = Arc::new(vec![
        VoiceProfile::new("fr", "Amelie", "fr-FR"),
        VoiceProfile::new("sam", "Samantha", "en-US"),
    ]);
    let repo = SledWordListRepository::open(dir.path().join("lists.sled")).unwrap();

    let state = AppState::new(
        engine,
        Arc::new(InMemorySessionManager::new()),
        Arc::new(StaticWordPool::builtin()),
        Arc::new(repo),
        library,
        voices,
        DictationDefaults::default(),
        publisher,
    );

    TestState {
        state: Arc::new(state),
        _dir: dir,
    }
}
