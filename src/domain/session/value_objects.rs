//! Session Context - Value Objects

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::SessionError;

/// 每个单词的间隔（秒），至少 1 秒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSecs(u32);

impl IntervalSecs {
    pub fn new(secs: u32) -> Result<Self, SessionError> {
        if secs < 1 {
            return Err(SessionError::InvalidInterval(secs));
        }
        Ok(Self(secs))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// 半程重复朗读的延迟（整秒换算为毫秒后取半）
    pub fn halfway(&self) -> Duration {
        Duration::from_millis(u64::from(self.0) * 1000 / 2)
    }
}

/// 语速倍率 (0.5 - 2.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechRate(f32);

impl SpeechRate {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 2.0;

    pub fn new(rate: f32) -> Result<Self, SessionError> {
        if !(Self::MIN..=Self::MAX).contains(&rate) {
            return Err(SessionError::InvalidSpeed(rate));
        }
        Ok(Self(rate))
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}

impl Default for SpeechRate {
    fn default() -> Self {
        Self(1.0)
    }
}

/// 会话阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// 状态迁移产生的副作用
///
/// 状态机本身不接触时钟和音频，由会话引擎按顺序执行
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// 立即朗读当前单词，并在 `repeat_after` 后重复一次
    ///
    /// 半程回调绑定 `generation`，会话换词后失效
    Announce {
        index: usize,
        word: String,
        generation: u64,
        repeat_after: Duration,
    },
    /// 朗读一次，不重新安排半程回调
    Speak { word: String },
    /// 停止当前声音（暂停）
    Silence,
    /// 启动每秒节拍
    StartCadence,
    /// 取消节拍、半程回调并停止声音
    Halt,
    /// 进入完成态
    Completed,
}

/// 会话快照 - 供观察者轮询或订阅
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_index: usize,
    pub current_word: Option<String>,
    /// 从 1 开始的序号
    pub word_number: usize,
    pub total_words: usize,
    /// `(current_index + 1) / total_words`
    pub progress: f64,
    pub remaining_secs: u32,
    pub interval_secs: u32,
    pub paused: bool,
    pub completed: bool,
    pub display_text: String,
    pub words: Vec<String>,
}
