//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::engine::EngineError;
use crate::application::ports::{RepositoryError, SessionRegistryError};
use crate::domain::session::SessionError;
use crate::domain::words::{SelectionError, WordListError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 资源冲突
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建冲突错误
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(name) => Self::not_found("Word list", name),
            RepositoryError::Duplicate(name) => {
                Self::conflict(format!("Word list already exists: {}", name))
            }
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<SelectionError> for ApplicationError {
    fn from(err: SelectionError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<WordListError> for ApplicationError {
    fn from(err: WordListError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidInterval(_) | SessionError::InvalidSpeed(_) => {
                Self::validation(err.to_string())
            }
            SessionError::SessionCompleted
            | SessionError::SessionNotActive
            | SessionError::SessionAlreadyActive => Self::invalid_state(err.to_string()),
        }
    }
}

impl From<EngineError> for ApplicationError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Session(e) => e.into(),
            EngineError::Closed => Self::invalid_state(err.to_string()),
        }
    }
}

impl From<SessionRegistryError> for ApplicationError {
    fn from(err: SessionRegistryError) -> Self {
        match err {
            SessionRegistryError::NotFound(id) => Self::not_found("Session", id),
            SessionRegistryError::AlreadyExists(id) => {
                Self::conflict(format!("Session already exists: {}", id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_map_to_kinds() {
        assert!(matches!(
            ApplicationError::from(SessionError::InvalidInterval(0)),
            ApplicationError::ValidationError(_)
        ));
        assert!(matches!(
            ApplicationError::from(EngineError::Session(SessionError::SessionCompleted)),
            ApplicationError::InvalidState(_)
        ));
        assert!(matches!(
            ApplicationError::from(RepositoryError::Duplicate("week 1".into())),
            ApplicationError::Conflict(_)
        ));
        assert_eq!(
            ApplicationError::from(SessionRegistryError::NotFound("abc".into())).to_string(),
            "Session not found: abc"
        );
    }
}
