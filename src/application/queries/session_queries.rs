//! Session Queries - 会话查询

/// 获取会话快照查询
#[derive(Debug, Clone)]
pub struct GetSession {
    pub session_id: String,
}
