//! Session Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Invalid interval: {0}s (must be at least 1 second)")]
    InvalidInterval(u32),

    #[error("Invalid speed: {0} (must be between 0.5 and 2.0)")]
    InvalidSpeed(f32),

    #[error("Session already completed")]
    SessionCompleted,

    #[error("Session is not active")]
    SessionNotActive,

    #[error("Session is already active")]
    SessionAlreadyActive,
}
