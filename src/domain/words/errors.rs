//! Words Context - Errors

use thiserror::Error;

/// 抽词错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Invalid word count: {count} (expected 1..={pool_size})")]
    InvalidCount { count: usize, pool_size: usize },

    #[error("Empty selection: choose at least one word")]
    EmptySelection,
}

/// 单词列表错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordListError {
    #[error("无效的列表名称: {0}")]
    InvalidName(String),

    #[error("列表至少需要一个单词")]
    Empty,

    #[error("未知的年级: {0}")]
    UnknownGrade(String),
}
