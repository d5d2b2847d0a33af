//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Words Context: 词库选词与保存的单词表
//! - Session Context: 听写会话状态机
//! - Audio Context: 音频路径与音色目录

pub mod audio;
pub mod session;
pub mod words;
