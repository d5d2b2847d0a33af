//! Audio Queries - 音频查询

use bytes::Bytes;

/// 获取音频查询，`path` 即缓存键
#[derive(Debug, Clone)]
pub struct GetClip {
    pub path: String,
}

/// 获取音频响应
#[derive(Debug, Clone)]
pub struct GetClipResponse {
    pub data: Bytes,
    pub content_type: &'static str,
}
