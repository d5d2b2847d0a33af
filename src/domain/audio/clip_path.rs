//! Audio Context - Clip Path

use serde::Serialize;
use std::fmt;

use crate::domain::words::GradeLevel;

pub const DEFAULT_CLIP_EXTENSION: &str = "mp3";

const CLIP_ROOT: &str = "audio";

/// 规范化单词为文件名
///
/// 小写，连续空白替换为单个 `_`，去掉 `[a-z0-9_-]` 之外的字符
pub fn sanitize_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }

    out
}

/// 预录音频路径，同时作为音频缓存的键
///
/// 形如 `audio/{grade}/{sanitized}.{ext}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClipPath(String);

impl ClipPath {
    pub fn resolve(word: &str, grade: GradeLevel, extension: &str) -> Self {
        Self(format!(
            "{}/{}/{}.{}",
            CLIP_ROOT,
            grade.as_str(),
            sanitize_word(word),
            extension
        ))
    }

    /// 从已有的键构造（例如合成语音缓存键）
    pub fn from_key(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> Option<&str> {
        let file = self.0.rsplit('/').next()?;
        file.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl fmt::Display for ClipPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
