//! Words Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{SelectionError, WordListError};

/// 年级 - 决定词库和预录音频目录
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeLevel {
    /// 2-3 年级
    #[default]
    Gr23,
    /// 4-5 年级
    Gr45,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 2] = [GradeLevel::Gr23, GradeLevel::Gr45];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gr23 => "gr23",
            Self::Gr45 => "gr45",
        }
    }

    /// 展示用标签，如 "2-3"
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gr23 => "2-3",
            Self::Gr45 => "4-5",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLevel {
    type Err = WordListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gr23" => Ok(Self::Gr23),
            "gr45" => Ok(Self::Gr45),
            other => Err(WordListError::UnknownGrade(other.to_string())),
        }
    }
}

/// 听写词序列
///
/// 不变量:
/// - 至少包含一个单词
/// - 会话开始后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordSequence(Vec<String>);

impl WordSequence {
    pub fn new(words: Vec<String>) -> Result<Self, SelectionError> {
        if words.is_empty() {
            return Err(SelectionError::EmptySelection);
        }
        Ok(Self(words))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 恒为 false，保留以配合 `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// 单词列表名称（去除首尾空白，非空）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListName(String);

impl ListName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, WordListError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(WordListError::InvalidName("名称不能为空".to_string()));
        }
        if name.chars().count() > 100 {
            return Err(WordListError::InvalidName(
                "名称长度不能超过100字符".to_string(),
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
