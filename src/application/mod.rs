//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ClipStore、AudioOutput、SpeechEngine、Repository 等）
//! - speech: 预录音频与合成语音的回退链
//! - engine: 每个会话一个 actor 的听写引擎
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod engine;
pub mod error;
pub mod ports;
pub mod queries;
pub mod speech;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    // Dictation commands
    ControlDictation,
    DictationDefaults,
    DictationResponse,
    StartDictation,
    StopDictation,
    WordSelection,
    // Word list commands
    DeleteWordList,
    SaveWordList,
    // Handlers
    handlers::{
        ControlDictationHandler, DeleteWordListHandler, SaveWordListHandler,
        StartDictationHandler, StopDictationHandler,
    },
};

pub use engine::{ControlAction, DictationEngine, EngineError, SessionHandle, SessionSettings};

pub use error::ApplicationError;

pub use ports::{
    // Audio
    speech_cache_key,
    AudioCachePort,
    AudioClip,
    AudioOutputPort,
    AudioProbePort,
    CacheStats,
    ClipInfo,
    ClipStoreError,
    ClipStorePort,
    OutputError,
    ProbeError,
    // Speech
    SessionAudio,
    SessionAudioFactoryPort,
    SpeechEnginePort,
    SpeechError,
    SpeechRequest,
    SynthesisRequest,
    SynthesisResponse,
    TtsEnginePort,
    TtsError,
    // Words
    RepositoryError,
    WordListRepositoryPort,
    WordPoolPort,
    // Session manager
    SessionManagerPort,
    SessionRegistryError,
};

pub use queries::{
    GetClip,
    GetClipResponse,
    GetSession,
    GetWordPool,
    ListVoices,
    ListWordLists,
    LoadWordList,
    VoiceListResponse,
    WordListSummary,
    WordPoolResponse,
    // Handlers
    handlers::{
        GetClipHandler, GetSessionHandler, GetWordPoolHandler, ListVoicesHandler,
        ListWordListsHandler, LoadWordListHandler,
    },
};

pub use speech::{
    AnnounceOutcome, AudioError, AudioSource, BackendKind, ClipLibrary, SoundBackend, SoundParams,
    SpeechFallbackChain,
};
