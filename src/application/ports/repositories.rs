//! Repository Ports - 出站端口
//!
//! 定义单词表持久化的抽象接口，具体实现在 infrastructure 层（Sled）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::words::{ListName, SavedWordList};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Word List Repository Port
#[async_trait]
pub trait WordListRepositoryPort: Send + Sync {
    /// 保存单词表
    ///
    /// 同名单词表已存在且 `overwrite = false` 时返回 `Duplicate`
    async fn save(&self, list: &SavedWordList, overwrite: bool) -> Result<(), RepositoryError>;

    /// 按名称查找
    async fn find(&self, name: &ListName) -> Result<Option<SavedWordList>, RepositoryError>;

    /// 删除单词表，返回是否存在
    async fn delete(&self, name: &ListName) -> Result<bool, RepositoryError>;

    /// 列出所有单词表（按名称排序）
    async fn list(&self) -> Result<Vec<SavedWordList>, RepositoryError>;
}
