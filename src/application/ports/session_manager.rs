//! Session Manager Port - 会话注册表
//!
//! 定义会话注册表的抽象接口，具体实现在 infrastructure/memory 层

use thiserror::Error;

use crate::application::engine::SessionHandle;

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionRegistryError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),
}

/// Session Manager Port
///
/// 保存会话 id 到会话引擎句柄的映射，所有状态存储在内存中
pub trait SessionManagerPort: Send + Sync {
    /// 注册会话
    fn insert(&self, handle: SessionHandle) -> Result<(), SessionRegistryError>;

    /// 获取会话句柄
    fn get(&self, id: &str) -> Result<SessionHandle, SessionRegistryError>;

    /// 移除会话，返回被移除的句柄
    fn remove(&self, id: &str) -> Option<SessionHandle>;

    /// 更新最后活动时间
    fn touch(&self, id: &str);

    /// 获取所有过期会话的 ID
    ///
    /// 过期 = 超过 `idle_timeout_secs` 没有活动，且不在 Running / Paused
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 获取所有会话 ID
    fn list_all(&self) -> Vec<String>;
}
