//! Session Handle - 会话引擎的对外句柄

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::ports::SessionAudioFactoryPort;
use crate::application::speech::{AudioSource, ClipLibrary};
use crate::domain::session::{DictationSession, SessionError, SessionSnapshot};
use crate::domain::words::WordSequence;

use super::driver::{SessionCommand, SessionDriver};
use super::{ControlAction, SessionSettings};

const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Session engine stopped")]
    Closed,
}

/// 会话引擎 - 为新会话创建 actor
pub struct DictationEngine {
    library: Arc<ClipLibrary>,
    audio: Arc<dyn SessionAudioFactoryPort>,
}

impl DictationEngine {
    pub fn new(library: Arc<ClipLibrary>, audio: Arc<dyn SessionAudioFactoryPort>) -> Self {
        Self { library, audio }
    }

    pub fn library(&self) -> &Arc<ClipLibrary> {
        &self.library
    }

    /// 创建空闲会话并启动它的 actor 任务
    pub fn spawn_session(&self) -> SessionHandle {
        let id = Uuid::new_v4().to_string();
        let audio = self.audio.create(&id);
        let source = AudioSource::new(self.library.clone(), audio.output);

        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(DictationSession::new().snapshot());
        let shutdown = CancellationToken::new();

        let driver = SessionDriver::new(id.clone(), source, audio.speech, timer_tx, snapshot_tx);
        tokio::spawn(driver.run(command_rx, timer_rx, shutdown.clone()));

        tracing::info!(session_id = %id, "Session created");

        SessionHandle {
            id,
            commands: command_tx,
            snapshots: snapshot_rx,
            shutdown,
        }
    }
}

/// 会话句柄，可克隆；所有句柄被丢弃后 actor 退出
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    shutdown: CancellationToken,
}

impl SessionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 开始（或在完成 / 停止后重新开始）听写
    pub async fn start(
        &self,
        sequence: WordSequence,
        settings: SessionSettings,
    ) -> Result<SessionSnapshot, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Start {
            sequence,
            settings,
            reply,
        })
        .await?;
        Ok(rx.await.map_err(|_| EngineError::Closed)??)
    }

    pub async fn control(&self, action: ControlAction) -> Result<SessionSnapshot, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Control { action, reply }).await?;
        Ok(rx.await.map_err(|_| EngineError::Closed)??)
    }

    pub async fn toggle_pause(&self) -> Result<SessionSnapshot, EngineError> {
        self.control(ControlAction::TogglePause).await
    }

    pub async fn next(&self) -> Result<SessionSnapshot, EngineError> {
        self.control(ControlAction::Next).await
    }

    pub async fn previous(&self) -> Result<SessionSnapshot, EngineError> {
        self.control(ControlAction::Previous).await
    }

    pub async fn repeat(&self) -> Result<SessionSnapshot, EngineError> {
        self.control(ControlAction::Repeat).await
    }

    /// 停止听写，会话回到 Idle（actor 继续存活）
    pub async fn stop(&self) -> Result<SessionSnapshot, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Stop { reply }).await?;
        rx.await.map_err(|_| EngineError::Closed)
    }

    /// 当前快照（轮询）
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// 订阅快照变化
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// 结束 actor 任务
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn send(&self, command: SessionCommand) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| EngineError::Closed)
    }
}
