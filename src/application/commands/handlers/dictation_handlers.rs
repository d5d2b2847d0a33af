//! Dictation Command Handlers

use std::sync::Arc;

use crate::application::commands::dictation_commands::*;
use crate::application::engine::{DictationEngine, SessionHandle, SessionSettings};
use crate::application::error::ApplicationError;
use crate::application::ports::{SessionManagerPort, WordListRepositoryPort, WordPoolPort};
use crate::domain::audio::{find_voice, VoiceProfile};
use crate::domain::session::{IntervalSecs, SessionSnapshot, SpeechRate};
use crate::domain::words::{
    select_random, use_custom_selection, GradeLevel, ListName, WordSequence,
};

/// StartDictation Handler - 选词并启动会话
pub struct StartDictationHandler {
    engine: Arc<DictationEngine>,
    session_manager: Arc<dyn SessionManagerPort>,
    word_pool: Arc<dyn WordPoolPort>,
    word_list_repo: Arc<dyn WordListRepositoryPort>,
    voices: Arc<Vec<VoiceProfile>>,
    defaults: DictationDefaults,
}

impl StartDictationHandler {
    pub fn new(
        engine: Arc<DictationEngine>,
        session_manager: Arc<dyn SessionManagerPort>,
        word_pool: Arc<dyn WordPoolPort>,
        word_list_repo: Arc<dyn WordListRepositoryPort>,
        voices: Arc<Vec<VoiceProfile>>,
        defaults: DictationDefaults,
    ) -> Self {
        Self {
            engine,
            session_manager,
            word_pool,
            word_list_repo,
            voices,
            defaults,
        }
    }

    pub async fn handle(&self, cmd: StartDictation) -> Result<DictationResponse, ApplicationError> {
        // 所有校验在创建会话之前完成
        let interval = IntervalSecs::new(cmd.interval_secs.unwrap_or(self.defaults.interval_secs))?;
        let rate = SpeechRate::new(cmd.speed.unwrap_or(self.defaults.speed))?;
        let (sequence, grade) = self.select_words(cmd.grade, cmd.selection).await?;

        let existing = match &cmd.session_id {
            Some(id) => Some(self.session_manager.get(id)?),
            None => None,
        };

        let voice_id = find_voice(&self.voices, cmd.voice_id.as_deref()).map(|v| v.id.clone());
        let settings = SessionSettings {
            interval_secs: interval.get(),
            rate,
            grade,
            voice_id,
            pre_rendered: cmd.pre_rendered.unwrap_or(self.defaults.pre_rendered),
        };

        let (session_id, snapshot) = match existing {
            Some(handle) => {
                let snapshot = handle.start(sequence, settings).await?;
                self.session_manager.touch(handle.id());
                (handle.id().to_string(), snapshot)
            }
            None => {
                let handle = self.engine.spawn_session();
                let snapshot = self.start_new(&handle, sequence, settings).await?;
                (handle.id().to_string(), snapshot)
            }
        };

        Ok(DictationResponse {
            session_id,
            snapshot,
        })
    }

    async fn start_new(
        &self,
        handle: &SessionHandle,
        sequence: WordSequence,
        settings: SessionSettings,
    ) -> Result<SessionSnapshot, ApplicationError> {
        match handle.start(sequence, settings).await {
            Ok(snapshot) => {
                self.session_manager.insert(handle.clone())?;
                Ok(snapshot)
            }
            Err(e) => {
                handle.shutdown();
                Err(e.into())
            }
        }
    }

    async fn select_words(
        &self,
        grade: GradeLevel,
        selection: WordSelection,
    ) -> Result<(WordSequence, GradeLevel), ApplicationError> {
        // ThreadRng 不是 Send，不能跨越 await
        match selection {
            WordSelection::Random { count } => {
                let pool = self.word_pool.words(grade);
                Ok((select_random(pool, count, &mut rand::rng())?, grade))
            }
            WordSelection::Custom { words, shuffle } => {
                let words = clean_words(words);
                Ok((use_custom_selection(&words, shuffle, &mut rand::rng())?, grade))
            }
            WordSelection::SavedList { name, shuffle } => {
                let name = ListName::new(&name)?;
                let list = self
                    .word_list_repo
                    .find(&name)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Word list", name.as_str()))?;
                let sequence = use_custom_selection(list.words(), shuffle, &mut rand::rng())?;
                Ok((sequence, list.grade()))
            }
        }
    }
}

/// 去除空白项和首尾空白
fn clean_words(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// ControlDictation Handler - 暂停/继续、导航、重复
pub struct ControlDictationHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl ControlDictationHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, cmd: ControlDictation) -> Result<DictationResponse, ApplicationError> {
        let handle = self.session_manager.get(&cmd.session_id)?;
        let snapshot = handle.control(cmd.action).await?;
        self.session_manager.touch(&cmd.session_id);

        Ok(DictationResponse {
            session_id: cmd.session_id,
            snapshot,
        })
    }
}

/// StopDictation Handler - 停止听写，会话保留以便重新开始
pub struct StopDictationHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl StopDictationHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, cmd: StopDictation) -> Result<DictationResponse, ApplicationError> {
        let handle = self.session_manager.get(&cmd.session_id)?;
        let snapshot = handle.stop().await?;
        self.session_manager.touch(&cmd.session_id);

        Ok(DictationResponse {
            session_id: cmd.session_id,
            snapshot,
        })
    }
}
