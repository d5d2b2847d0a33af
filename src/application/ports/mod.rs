//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_cache;
mod audio_output;
mod audio_probe;
mod clip_store;
mod repositories;
mod session_audio;
mod session_manager;
mod speech_engine;
mod tts_engine;
mod word_pool;

pub use audio_cache::{speech_cache_key, AudioCachePort, AudioClip, CacheStats};
pub use audio_output::{AudioOutputPort, OutputError};
pub use audio_probe::{AudioProbePort, ClipInfo, ProbeError};
pub use clip_store::{ClipStoreError, ClipStorePort};
pub use repositories::{RepositoryError, WordListRepositoryPort};
pub use session_audio::{SessionAudio, SessionAudioFactoryPort};
pub use session_manager::{SessionManagerPort, SessionRegistryError};
pub use speech_engine::{SpeechEnginePort, SpeechError, SpeechRequest};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
pub use word_pool::WordPoolPort;
