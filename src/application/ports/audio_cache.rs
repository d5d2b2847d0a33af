//! Audio Cache Port - 已加载音频缓存
//!
//! 定义音频缓存的抽象接口，具体实现在 infrastructure/memory 层

use bytes::Bytes;

use crate::domain::audio::ClipPath;

use super::ClipInfo;

/// 已加载、可重复播放的音频
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub path: ClipPath,
    /// 共享缓冲区，clone 不复制数据
    pub data: Bytes,
    pub info: ClipInfo,
}

impl AudioClip {
    pub fn new(path: ClipPath, data: Vec<u8>, info: ClipInfo) -> Self {
        Self {
            path,
            data: Bytes::from(data),
            info,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Audio Cache Port
///
/// 以 ClipPath 为键，条目在进程生命周期内保留
pub trait AudioCachePort: Send + Sync {
    /// 获取缓存条目（命中时计数）
    fn get(&self, key: &ClipPath) -> Option<AudioClip>;

    /// 写入缓存条目，已存在时覆盖
    fn put(&self, clip: AudioClip);

    /// 检查缓存是否存在（不计入命中统计）
    fn contains(&self, key: &ClipPath) -> bool;

    /// 获取缓存统计信息
    fn stats(&self) -> CacheStats;
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: u64,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// 生成合成语音的缓存 key
///
/// 使用 md5(word + voice + rate) 作为文件名，放在 `speech/` 下
pub fn speech_cache_key(word: &str, voice_id: Option<&str>, rate: f32) -> ClipPath {
    let material = format!("{}|{}|{:.2}", word, voice_id.unwrap_or(""), rate);
    let digest = md5::compute(material.as_bytes());
    ClipPath::from_key(format!("speech/{:x}", digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_cache_key_is_stable() {
        let a = speech_cache_key("cat", Some("sam"), 1.0);
        let b = speech_cache_key("cat", Some("sam"), 1.0);
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("speech/"));
        assert_eq!(a.as_str().len(), "speech/".len() + 32);
    }

    #[test]
    fn test_speech_cache_key_varies_by_params() {
        let base = speech_cache_key("cat", None, 1.0);
        assert_ne!(base, speech_cache_key("dog", None, 1.0));
        assert_ne!(base, speech_cache_key("cat", Some("sam"), 1.0));
        assert_ne!(base, speech_cache_key("cat", None, 1.5));
    }
}
