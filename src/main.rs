//! Spelldict - 单词听写训练服务
//!
//! - Domain: words/, session/, audio/
//! - Application: engine, speech, commands, queries, ports
//! - Infrastructure: http, memory, worker, persistence, adapters, events

use std::sync::Arc;
use std::time::Duration;

use spelldict::application::ports::{AudioCachePort, AudioProbePort, ClipStorePort, TtsEnginePort, WordPoolPort};
use spelldict::application::{ClipLibrary, DictationEngine};
use spelldict::config::{load_config, print_config, AppConfig, ClipSourceKind, SpeechBackendKind};
use spelldict::infrastructure::adapters::{
    EventSessionAudioFactory, FakeTtsClient, FileClipStore, HttpClipStore, HttpClipStoreConfig,
    HttpTtsClient, HttpTtsClientConfig, SpeechBackendConfig, StaticWordPool, SymphoniaProbe,
};
use spelldict::infrastructure::events::EventPublisher;
use spelldict::infrastructure::http::{AppState, HttpServer};
use spelldict::infrastructure::memory::{InMemoryAudioCache, InMemorySessionManager};
use spelldict::infrastructure::persistence::SledWordListRepository;
use spelldict::infrastructure::worker::{SessionReaper, SessionReaperConfig};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Spelldict - 单词听写训练服务");
    print_config(&config);

    // 词库
    let word_pool: Arc<dyn WordPoolPort> = match &config.storage.words_dir {
        Some(dir) => Arc::new(StaticWordPool::from_dir(dir)?),
        None => Arc::new(StaticWordPool::builtin()),
    };

    // 单词表存储
    if let Some(parent) = config.storage.lists_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let word_list_repo = Arc::new(
        SledWordListRepository::open(&config.storage.lists_path)
            .map_err(|e| anyhow::anyhow!("Failed to open word list store: {}", e))?,
    );

    // 预录音频
    let clip_store: Arc<dyn ClipStorePort> = match config.audio.source {
        ClipSourceKind::File => Arc::new(FileClipStore::new(&config.audio.dir)),
        ClipSourceKind::Http => Arc::new(
            HttpClipStore::new(HttpClipStoreConfig {
                base_url: config.audio.base_url.clone(),
                timeout_secs: config.audio.fetch_timeout_secs,
            })
            .map_err(|e| anyhow::anyhow!("Failed to create clip store: {}", e))?,
        ),
    };
    let probe: Arc<dyn AudioProbePort> = Arc::new(SymphoniaProbe::new());
    let audio_cache: Arc<dyn AudioCachePort> = Arc::new(InMemoryAudioCache::new());
    let library = Arc::new(ClipLibrary::new(
        clip_store,
        probe.clone(),
        audio_cache.clone(),
        config.audio.extension.clone(),
        config.audio.load_timeout(),
    ));

    // 创建事件发布器
    let event_publisher = Arc::new(EventPublisher::new());

    // 合成语音
    let speech_backend = match config.speech.backend {
        SpeechBackendKind::Client => SpeechBackendConfig::Client,
        SpeechBackendKind::Tts => SpeechBackendConfig::Tts {
            tts: create_tts_engine(&config)?,
            cache: audio_cache.clone(),
            probe: probe.clone(),
        },
    };
    let audio_factory = Arc::new(EventSessionAudioFactory::new(
        event_publisher.clone(),
        config.server.clip_base_url(),
        speech_backend,
    ));

    let engine = Arc::new(DictationEngine::new(library.clone(), audio_factory));
    let session_manager = Arc::new(InMemorySessionManager::new());

    // 启动会话回收
    let shutdown = CancellationToken::new();
    if config.gc.enabled {
        let reaper = SessionReaper::new(
            SessionReaperConfig {
                interval: Duration::from_secs(config.gc.interval_secs),
                idle_timeout_secs: config.gc.session_expire_secs,
            },
            session_manager.clone(),
            event_publisher.clone(),
        );
        tokio::spawn(reaper.run(shutdown.clone()));
    }

    // 创建 HTTP 服务器
    let state = AppState::new(
        engine,
        session_manager,
        word_pool,
        word_list_repo,
        library,
        Arc::new(config.speech.voices.clone()),
        (&config.dictation).into(),
        event_publisher,
    );

    let server = HttpServer::new(format!("{}:{}", config.server.host, config.server.port), state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    shutdown.cancel();
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，RUST_LOG 优先
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},spelldict={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn create_tts_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    if config.tts.fake {
        tracing::warn!("Using fake TTS engine (silent audio)");
        return Ok(Arc::new(FakeTtsClient::with_defaults()));
    }

    let tts_config = HttpTtsClientConfig::new(config.tts.url.clone())
        .with_timeout(config.tts.timeout_secs)
        .with_retries(config.tts.max_retries);
    let client = HttpTtsClient::new(tts_config)
        .map_err(|e| anyhow::anyhow!("Failed to create TTS client: {}", e))?;
    Ok(Arc::new(client))
}
