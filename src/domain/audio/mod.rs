//! Audio Context - 音频资源限界上下文
//!
//! 职责:
//! - 单词到预录音频路径的确定性映射
//! - 合成语音的音色目录与默认音色选择

mod clip_path;
mod voice;

pub use clip_path::{sanitize_word, ClipPath, DEFAULT_CLIP_EXTENSION};
pub use voice::{default_voice, find_voice, VoiceProfile};
