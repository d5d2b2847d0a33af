//! Session Context - Aggregate Root

use super::{IntervalSecs, SessionEffect, SessionError, SessionPhase, SessionSnapshot};
use crate::domain::words::WordSequence;

/// 完成态展示文本
pub const COMPLETION_TEXT: &str = "Dictation Complete!";

/// 听写会话聚合根
///
/// 不变量:
/// - `current_index` 始终位于 `[0, len)`，只有 `previous` 会使其回退
/// - 每次换词时 `remaining_secs` 重置为 `interval`
/// - 每次朗读新单词 `generation` 递增，旧的半程回调随之失效
#[derive(Debug, Clone)]
pub struct DictationSession {
    sequence: Option<WordSequence>,
    interval: Option<IntervalSecs>,
    current_index: usize,
    remaining_secs: u32,
    phase: SessionPhase,
    generation: u64,
}

impl DictationSession {
    /// 创建空闲会话
    pub fn new() -> Self {
        Self {
            sequence: None,
            interval: None,
            current_index: 0,
            remaining_secs: 0,
            phase: SessionPhase::Idle,
            generation: 0,
        }
    }

    /// 开始听写
    ///
    /// 校验失败时不修改任何状态
    pub fn start(
        &mut self,
        sequence: WordSequence,
        interval_secs: u32,
    ) -> Result<Vec<SessionEffect>, SessionError> {
        if self.phase.is_active() {
            return Err(SessionError::SessionAlreadyActive);
        }
        let interval = IntervalSecs::new(interval_secs)?;

        self.sequence = Some(sequence);
        self.interval = Some(interval);
        self.current_index = 0;
        self.remaining_secs = interval.get();
        self.phase = SessionPhase::Running;

        let mut effects = self.announce_current();
        effects.push(SessionEffect::StartCadence);
        Ok(effects)
    }

    /// 每秒节拍
    ///
    /// 仅在 Running 时倒计时；归零时前进到下一个单词
    pub fn tick(&mut self) -> Vec<SessionEffect> {
        if self.phase != SessionPhase::Running {
            return Vec::new();
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.advance()
        } else {
            Vec::new()
        }
    }

    /// 倒计时归零后前进
    fn advance(&mut self) -> Vec<SessionEffect> {
        if self.current_index + 1 < self.len() {
            self.current_index += 1;
            self.reset_countdown();
            self.announce_current()
        } else {
            self.complete()
        }
    }

    /// 上一个单词（位于首词时为空操作）
    pub fn previous(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        self.ensure_active()?;
        if self.current_index == 0 {
            return Ok(Vec::new());
        }

        self.current_index -= 1;
        self.reset_countdown();
        Ok(self.announce_current())
    }

    /// 下一个单词（位于末词时直接完成）
    pub fn next(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        self.ensure_active()?;
        if self.current_index + 1 >= self.len() {
            return Ok(self.complete());
        }

        self.current_index += 1;
        self.reset_countdown();
        Ok(self.announce_current())
    }

    /// 重复当前单词，不改变索引和倒计时
    pub fn repeat(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        self.ensure_active()?;
        Ok(self
            .current_word()
            .map(|word| {
                vec![SessionEffect::Speak {
                    word: word.to_string(),
                }]
            })
            .unwrap_or_default())
    }

    /// 暂停 / 继续
    ///
    /// 暂停时停止所有声音；继续时不自动重读，等待后续节拍事件
    pub fn toggle_pause(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        self.ensure_active()?;
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Paused;
                Ok(vec![SessionEffect::Silence])
            }
            _ => {
                self.phase = SessionPhase::Running;
                Ok(Vec::new())
            }
        }
    }

    /// 停止并回到 Idle
    pub fn stop(&mut self) -> Vec<SessionEffect> {
        if self.phase == SessionPhase::Idle {
            return Vec::new();
        }
        self.phase = SessionPhase::Idle;
        self.generation += 1;
        vec![SessionEffect::Halt]
    }

    /// 半程回调到期
    ///
    /// 仅当回调所属的 generation 仍是当前单词且未暂停时重复朗读
    pub fn on_halfway(&self, generation: u64) -> Vec<SessionEffect> {
        if self.phase != SessionPhase::Running || generation != self.generation {
            return Vec::new();
        }
        self.current_word()
            .map(|word| {
                vec![SessionEffect::Speak {
                    word: word.to_string(),
                }]
            })
            .unwrap_or_default()
    }

    fn announce_current(&mut self) -> Vec<SessionEffect> {
        let Some(word) = self.current_word().map(str::to_string) else {
            return self.complete();
        };
        let Some(interval) = self.interval else {
            return self.complete();
        };

        self.generation += 1;
        vec![SessionEffect::Announce {
            index: self.current_index,
            word,
            generation: self.generation,
            repeat_after: interval.halfway(),
        }]
    }

    fn complete(&mut self) -> Vec<SessionEffect> {
        self.phase = SessionPhase::Completed;
        self.generation += 1;
        vec![SessionEffect::Halt, SessionEffect::Completed]
    }

    fn reset_countdown(&mut self) {
        self.remaining_secs = self.interval.map(|i| i.get()).unwrap_or(0);
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Running | SessionPhase::Paused => Ok(()),
            SessionPhase::Completed => Err(SessionError::SessionCompleted),
            SessionPhase::Idle => Err(SessionError::SessionNotActive),
        }
    }

    fn len(&self) -> usize {
        self.sequence.as_ref().map(WordSequence::len).unwrap_or(0)
    }

    // Getters
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn current_word(&self) -> Option<&str> {
        self.sequence
            .as_ref()
            .and_then(|seq| seq.get(self.current_index))
    }

    /// 生成观察者快照
    pub fn snapshot(&self) -> SessionSnapshot {
        let total_words = self.len();
        let completed = self.phase == SessionPhase::Completed;
        let current_word = if self.phase.is_active() {
            self.current_word().map(str::to_string)
        } else {
            None
        };
        let progress = if total_words == 0 {
            0.0
        } else if completed {
            1.0
        } else {
            (self.current_index + 1) as f64 / total_words as f64
        };
        let display_text = if completed {
            COMPLETION_TEXT.to_string()
        } else {
            current_word.clone().unwrap_or_default()
        };

        SessionSnapshot {
            phase: self.phase,
            current_index: self.current_index,
            current_word,
            word_number: if total_words == 0 { 0 } else { self.current_index + 1 },
            total_words,
            progress,
            remaining_secs: self.remaining_secs,
            interval_secs: self.interval.map(|i| i.get()).unwrap_or(0),
            paused: self.phase == SessionPhase::Paused,
            completed,
            display_text,
            words: self
                .sequence
                .as_ref()
                .map(|seq| seq.as_slice().to_vec())
                .unwrap_or_default(),
        }
    }
}

impl Default for DictationSession {
    fn default() -> Self {
        Self::new()
    }
}
