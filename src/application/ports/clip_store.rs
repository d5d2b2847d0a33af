//! Clip Store Port - 预录音频资源存储（只读）
//!
//! 具体实现: 本地目录 / HTTP 静态资源

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::ClipPath;

#[derive(Debug, Error)]
pub enum ClipStoreError {
    #[error("Clip not found: {0}")]
    NotFound(String),

    #[error("Invalid clip path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,
}

/// Clip Store Port
#[async_trait]
pub trait ClipStorePort: Send + Sync {
    /// 读取音频原始字节
    async fn fetch(&self, path: &ClipPath) -> Result<Vec<u8>, ClipStoreError>;
}
