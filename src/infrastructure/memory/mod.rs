//! Memory Layer - In-Memory State Management
//!
//! 实现 SessionManager 和 AudioCache，管理听写会话和已加载音频的内存状态

mod audio_cache;
mod session_manager;

pub use audio_cache::InMemoryAudioCache;
pub use session_manager::InMemorySessionManager;
