//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ControlDictationHandler, DeleteWordListHandler, SaveWordListHandler, StartDictationHandler,
    StopDictationHandler,
    // Query handlers
    GetClipHandler, GetSessionHandler, GetWordPoolHandler, ListVoicesHandler,
    ListWordListsHandler, LoadWordListHandler,
    // Engine & ports
    ClipLibrary, DictationDefaults, DictationEngine, SessionManagerPort, WordListRepositoryPort,
    WordPoolPort,
};
use crate::domain::audio::VoiceProfile;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session_manager: Arc<dyn SessionManagerPort>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub start_dictation_handler: StartDictationHandler,
    pub control_dictation_handler: ControlDictationHandler,
    pub stop_dictation_handler: StopDictationHandler,
    pub save_word_list_handler: SaveWordListHandler,
    pub delete_word_list_handler: DeleteWordListHandler,

    // ========== Query Handlers ==========
    pub get_session_handler: GetSessionHandler,
    pub get_word_pool_handler: GetWordPoolHandler,
    pub load_word_list_handler: LoadWordListHandler,
    pub list_word_lists_handler: ListWordListsHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub get_clip_handler: GetClipHandler,
}

impl AppState {
    /// 创建应用状态
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        engine: Arc<DictationEngine>,
        session_manager: Arc<dyn SessionManagerPort>,
        word_pool: Arc<dyn WordPoolPort>,
        word_list_repo: Arc<dyn WordListRepositoryPort>,
        library: Arc<ClipLibrary>,
        voices: Arc<Vec<VoiceProfile>>,
        defaults: DictationDefaults,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            // Ports
            session_manager: session_manager.clone(),
            event_publisher,

            // Command handlers
            start_dictation_handler: StartDictationHandler::new(
                engine,
                session_manager.clone(),
                word_pool.clone(),
                word_list_repo.clone(),
                voices.clone(),
                defaults,
            ),
            control_dictation_handler: ControlDictationHandler::new(session_manager.clone()),
            stop_dictation_handler: StopDictationHandler::new(session_manager.clone()),
            save_word_list_handler: SaveWordListHandler::new(word_list_repo.clone()),
            delete_word_list_handler: DeleteWordListHandler::new(word_list_repo.clone()),

            // Query handlers
            get_session_handler: GetSessionHandler::new(session_manager),
            get_word_pool_handler: GetWordPoolHandler::new(word_pool),
            load_word_list_handler: LoadWordListHandler::new(word_list_repo.clone()),
            list_word_lists_handler: ListWordListsHandler::new(word_list_repo),
            list_voices_handler: ListVoicesHandler::new(voices),
            get_clip_handler: GetClipHandler::new(library),
        }
    }
}
