//! Session Query Handlers

use std::sync::Arc;

use crate::application::commands::DictationResponse;
use crate::application::error::ApplicationError;
use crate::application::ports::SessionManagerPort;
use crate::application::queries::GetSession;

/// GetSession Handler - 轮询会话快照
pub struct GetSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub fn handle(&self, query: GetSession) -> Result<DictationResponse, ApplicationError> {
        let handle = self.session_manager.get(&query.session_id)?;
        Ok(DictationResponse {
            session_id: query.session_id,
            snapshot: handle.snapshot(),
        })
    }
}
