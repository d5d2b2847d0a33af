//! Audio Probe Port - 音频探测
//!
//! 验证取回的音频数据可以解码，并提取基本信息

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Empty audio data")]
    Empty,

    #[error("Unsupported format: {0}")]
    Unsupported(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// 音频基本信息
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClipInfo {
    /// 编码名称，如 "mp3" / "pcm_s16le"
    pub codec: String,
    pub sample_rate: Option<u32>,
    pub channels: Option<usize>,
    pub duration_ms: Option<u64>,
}

/// Audio Probe Port
pub trait AudioProbePort: Send + Sync {
    /// 探测音频数据
    ///
    /// `extension` 作为格式提示，可为空
    fn probe(&self, data: &[u8], extension: Option<&str>) -> Result<ClipInfo, ProbeError>;
}
