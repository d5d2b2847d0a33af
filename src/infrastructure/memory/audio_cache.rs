//! In-Memory Audio Cache Implementation

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::ports::{AudioCachePort, AudioClip, CacheStats};
use crate::domain::audio::ClipPath;

/// 内存音频缓存
///
/// 条目在进程生命周期内保留，不做淘汰
pub struct InMemoryAudioCache {
    clips: DashMap<ClipPath, AudioClip>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl InMemoryAudioCache {
    pub fn new() -> Self {
        Self {
            clips: DashMap::new(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }
}

impl Default for InMemoryAudioCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCachePort for InMemoryAudioCache {
    fn get(&self, key: &ClipPath) -> Option<AudioClip> {
        match self.clips.get(key) {
            Some(entry) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(key = %key, "Audio cache hit");
                Some(entry.value().clone())
            }
            None => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn put(&self, clip: AudioClip) {
        tracing::debug!(key = %clip.path, size_bytes = clip.size_bytes(), "Audio cached");
        self.clips.insert(clip.path.clone(), clip);
    }

    fn contains(&self, key: &ClipPath) -> bool {
        self.clips.contains_key(key)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.clips.len(),
            total_size_bytes: self
                .clips
                .iter()
                .map(|e| e.value().size_bytes() as u64)
                .sum(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }
}
