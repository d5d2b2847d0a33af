//! Session Driver - 会话 actor
//!
//! 状态机、计时器和发声任务只在这个任务里被访问，
//! 命令、节拍和半程回调都以消息形式到达

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::application::ports::SpeechEnginePort;
use crate::application::speech::{AudioSource, SoundParams, SpeechFallbackChain};
use crate::domain::session::{
    DictationSession, SessionEffect, SessionError, SessionSnapshot, SpeechRate,
};
use crate::domain::words::{GradeLevel, WordSequence};

use super::{CadenceScheduler, HalfwayTimer, TimerEvent};

/// 会话参数，在 start 时确定
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub interval_secs: u32,
    pub rate: SpeechRate,
    pub grade: GradeLevel,
    /// 已解析的音色 ID
    pub voice_id: Option<String>,
    pub pre_rendered: bool,
}

/// 运行中会话的控制操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    TogglePause,
    Next,
    Previous,
    Repeat,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TogglePause => "toggle_pause",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Repeat => "repeat",
        }
    }
}

type Reply<T> = oneshot::Sender<T>;

pub(super) enum SessionCommand {
    Start {
        sequence: WordSequence,
        settings: SessionSettings,
        reply: Reply<Result<SessionSnapshot, SessionError>>,
    },
    Control {
        action: ControlAction,
        reply: Reply<Result<SessionSnapshot, SessionError>>,
    },
    Stop {
        reply: Reply<SessionSnapshot>,
    },
}

pub(super) struct SessionDriver {
    id: String,
    session: DictationSession,
    source: AudioSource,
    speech: Arc<dyn SpeechEnginePort>,
    chain: Arc<SpeechFallbackChain>,
    params: Option<SoundParams>,
    cadence: CadenceScheduler,
    halfway: HalfwayTimer,
    sound_task: Option<JoinHandle<()>>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionDriver {
    pub(super) fn new(
        id: String,
        source: AudioSource,
        speech: Arc<dyn SpeechEnginePort>,
        timers: mpsc::UnboundedSender<TimerEvent>,
        snapshots: watch::Sender<SessionSnapshot>,
    ) -> Self {
        let chain = Arc::new(SpeechFallbackChain::new(source.clone(), speech.clone(), false));
        Self {
            id,
            session: DictationSession::new(),
            source,
            speech,
            chain,
            params: None,
            cadence: CadenceScheduler::new(timers.clone()),
            halfway: HalfwayTimer::new(timers),
            sound_task: None,
            snapshots,
        }
    }

    pub(super) async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut timers: mpsc::UnboundedReceiver<TimerEvent>,
        shutdown: CancellationToken,
    ) {
        tracing::debug!(session_id = %self.id, "Session driver started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = timers.recv() => self.handle_timer(event),
            }
        }

        let effects = self.session.stop();
        self.execute(effects);
        self.publish();

        tracing::debug!(session_id = %self.id, "Session driver stopped");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Start {
                sequence,
                settings,
                reply,
            } => {
                let result = self.start(sequence, settings);
                let _ = reply.send(result);
            }
            SessionCommand::Control { action, reply } => {
                let result = self.control(action);
                let _ = reply.send(result);
            }
            SessionCommand::Stop { reply } => {
                let effects = self.session.stop();
                self.execute(effects);
                self.publish();
                tracing::info!(session_id = %self.id, "Dictation stopped");
                let _ = reply.send(self.session.snapshot());
            }
        }
    }

    fn start(
        &mut self,
        sequence: WordSequence,
        settings: SessionSettings,
    ) -> Result<SessionSnapshot, SessionError> {
        let total = sequence.len();
        let effects = self.session.start(sequence, settings.interval_secs)?;

        self.chain = Arc::new(SpeechFallbackChain::new(
            self.source.clone(),
            self.speech.clone(),
            settings.pre_rendered,
        ));
        self.params = Some(SoundParams {
            grade: settings.grade,
            rate: settings.rate,
            voice_id: settings.voice_id.clone(),
        });

        tracing::info!(
            session_id = %self.id,
            total_words = total,
            interval_secs = settings.interval_secs,
            rate = settings.rate.get(),
            grade = %settings.grade,
            pre_rendered = settings.pre_rendered,
            "Dictation started"
        );

        self.execute(effects);
        self.publish();
        Ok(self.session.snapshot())
    }

    fn control(&mut self, action: ControlAction) -> Result<SessionSnapshot, SessionError> {
        let effects = match action {
            ControlAction::TogglePause => self.session.toggle_pause(),
            ControlAction::Next => self.session.next(),
            ControlAction::Previous => self.session.previous(),
            ControlAction::Repeat => self.session.repeat(),
        }?;

        tracing::debug!(
            session_id = %self.id,
            action = action.as_str(),
            index = self.session.current_index(),
            "Session control applied"
        );

        self.execute(effects);
        self.publish();
        Ok(self.session.snapshot())
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        let effects = match event {
            TimerEvent::Tick { stream } if self.cadence.is_current(stream) => self.session.tick(),
            TimerEvent::Tick { .. } => return,
            TimerEvent::Halfway { generation } => self.session.on_halfway(generation),
        };
        self.execute(effects);
        self.publish();
    }

    fn execute(&mut self, effects: Vec<SessionEffect>) {
        for effect in effects {
            match effect {
                SessionEffect::Announce {
                    index,
                    word,
                    generation,
                    repeat_after,
                } => {
                    tracing::debug!(
                        session_id = %self.id,
                        index,
                        word = %word,
                        "Announcing word"
                    );
                    self.halfway.schedule(repeat_after, generation);
                    self.spawn_sound(word);
                }
                SessionEffect::Speak { word } => self.spawn_sound(word),
                SessionEffect::Silence => self.silence(),
                SessionEffect::StartCadence => self.cadence.start(),
                SessionEffect::Halt => {
                    self.cadence.cancel();
                    self.halfway.cancel();
                    self.silence();
                }
                SessionEffect::Completed => {
                    tracing::info!(session_id = %self.id, "Dictation completed");
                }
            }
        }
    }

    /// 新的发声任务启动前中止旧任务
    fn spawn_sound(&mut self, word: String) {
        self.abort_sound();

        let Some(params) = self.params.clone() else {
            return;
        };
        let chain = self.chain.clone();
        let session_id = self.id.clone();

        self.sound_task = Some(tokio::spawn(async move {
            let outcome = chain.announce(&word, &params).await;
            tracing::trace!(session_id = %session_id, word = %word, ?outcome, "Sound produced");
        }));
    }

    fn silence(&mut self) {
        self.abort_sound();
        self.chain.silence();
    }

    fn abort_sound(&mut self) {
        if let Some(task) = self.sound_task.take() {
            task.abort();
        }
    }

    fn publish(&self) {
        let next = self.session.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.abort_sound();
    }
}
