//! Audio Output Port - 会话的播放输出
//!
//! 每个会话一个输出，同一时刻至多一个播放

use async_trait::async_trait;
use thiserror::Error;

use super::AudioClip;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Playback rejected: {0}")]
    Rejected(String),
}

/// Audio Output Port
#[async_trait]
pub trait AudioOutputPort: Send + Sync {
    /// 开始播放
    ///
    /// 先停止当前播放，播放开始后返回，不等待播放结束
    async fn play(&self, clip: &AudioClip, rate: f32) -> Result<(), OutputError>;

    /// 停止当前播放（没有播放时为空操作）
    fn halt(&self);
}
