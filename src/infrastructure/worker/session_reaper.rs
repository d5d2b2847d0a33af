//! Session Reaper - 回收空闲会话

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::SessionManagerPort;
use crate::infrastructure::events::EventPublisher;

/// Reaper 配置
#[derive(Debug, Clone)]
pub struct SessionReaperConfig {
    /// 扫描间隔
    pub interval: Duration,
    /// 空闲超过该时长（且不在听写中）的会话被回收
    pub idle_timeout_secs: u64,
}

impl Default for SessionReaperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            idle_timeout_secs: 86400,
        }
    }
}

/// 会话回收 Worker
pub struct SessionReaper {
    config: SessionReaperConfig,
    session_manager: Arc<dyn SessionManagerPort>,
    event_publisher: Arc<EventPublisher>,
}

impl SessionReaper {
    pub fn new(
        config: SessionReaperConfig,
        session_manager: Arc<dyn SessionManagerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            config,
            session_manager,
            event_publisher,
        }
    }

    /// 启动 Worker，直到 `shutdown` 被取消
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            idle_timeout_secs = self.config.idle_timeout_secs,
            "SessionReaper started"
        );

        let start = tokio::time::Instant::now() + self.config.interval;
        let mut ticker = tokio::time::interval_at(start, self.config.interval);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.reap_once();
                }
            }
        }

        tracing::info!("SessionReaper stopped");
    }

    /// 执行一次回收，返回被回收的会话数
    pub fn reap_once(&self) -> usize {
        let expired = self
            .session_manager
            .get_expired_sessions(self.config.idle_timeout_secs);

        let mut reaped = 0;
        for session_id in expired {
            let Some(handle) = self.session_manager.remove(&session_id) else {
                continue;
            };
            handle.shutdown();
            self.event_publisher
                .publish_session_closed(&session_id, "expired");
            self.event_publisher.unregister_session(&session_id);
            reaped += 1;

            tracing::info!(session_id = %session_id, "Expired session reaped");
        }

        if reaped > 0 {
            tracing::info!(
                reaped,
                remaining = self.session_manager.list_all().len(),
                "Session reap finished"
            );
        }

        reaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::DictationEngine;
    use crate::application::testing::{library, FakeClipStore, RecordingAudioFactory};
    use crate::infrastructure::events::WsEvent;
    use crate::infrastructure::memory::InMemorySessionManager;

    #[tokio::test]
    async fn test_reaps_idle_sessions_and_notifies_observers() {
        let engine = DictationEngine::new(
            Arc::new(library(Arc::new(FakeClipStore::with_clips(&[])))),
            Arc::new(RecordingAudioFactory::default()),
        );
        let manager = Arc::new(InMemorySessionManager::new());
        let publisher = Arc::new(EventPublisher::new());

        let handle = engine.spawn_session();
        let session_id = handle.id().to_string();
        let mut events = publisher.register_session(&session_id);
        manager.insert(handle.clone()).unwrap();

        let reaper = SessionReaper::new(
            SessionReaperConfig {
                interval: Duration::from_secs(1),
                idle_timeout_secs: 0,
            },
            manager.clone(),
            publisher.clone(),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(reaper.reap_once(), 1);
        assert!(manager.is_empty());
        assert!(matches!(
            events.recv().await.unwrap(),
            WsEvent::SessionClosed { reason, .. } if reason == "expired"
        ));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(handle.is_closed());
        assert_eq!(reaper.reap_once(), 0);
    }
}
