//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, ClipSourceKind, SpeechBackendKind};
use crate::domain::session::{IntervalSecs, SpeechRate};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SPELLDICT_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SPELLDICT_SERVER__PORT=8080`
/// - `SPELLDICT_AUDIO__SOURCE=http`
/// - `SPELLDICT_AUDIO__BASE_URL=https://cdn.example.com/dictation`
/// - `SPELLDICT_SPEECH__BACKEND=tts`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("audio.source", "file")?
        .set_default("audio.dir", "static")?
        .set_default("audio.extension", "mp3")?
        .set_default("audio.load_timeout_ms", 5000)?
        .set_default("audio.fetch_timeout_secs", 10)?
        .set_default("speech.backend", "client")?
        .set_default("tts.url", "http://localhost:8000")?
        .set_default("tts.timeout_secs", 30)?
        .set_default("tts.max_retries", 0)?
        .set_default("tts.fake", false)?
        .set_default("dictation.default_interval_secs", 10)?
        .set_default("dictation.default_speed", 1.0)?
        .set_default("dictation.pre_rendered", true)?
        .set_default("storage.lists_path", "data/lists.sled")?
        .set_default("gc.enabled", true)?
        .set_default("gc.interval_secs", 300)?
        .set_default("gc.session_expire_secs", 3600)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("SPELLDICT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    if config.server.port == 0 {
        return invalid("Server port cannot be 0");
    }

    if config.audio.extension.trim().is_empty() {
        return invalid("Audio extension cannot be empty");
    }

    if config.audio.source == ClipSourceKind::Http && config.audio.base_url.trim().is_empty() {
        return invalid("Audio base URL cannot be empty when audio source is http");
    }

    if config.speech.backend == SpeechBackendKind::Tts
        && !config.tts.fake
        && config.tts.url.trim().is_empty()
    {
        return invalid("TTS URL cannot be empty when speech backend is tts");
    }

    if IntervalSecs::new(config.dictation.default_interval_secs).is_err() {
        return invalid("Default interval must be at least 1 second");
    }

    if SpeechRate::new(config.dictation.default_speed).is_err() {
        return invalid("Default speed must be between 0.5 and 2.0");
    }

    if config.storage.lists_path.as_os_str().is_empty() {
        return invalid("Word list storage path cannot be empty");
    }

    if config.gc.enabled && config.gc.interval_secs == 0 {
        return invalid("GC interval cannot be 0 when GC is enabled");
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    match config.audio.source {
        ClipSourceKind::File => tracing::info!("Audio Source: file ({:?})", config.audio.dir),
        ClipSourceKind::Http => tracing::info!("Audio Source: http ({})", config.audio.base_url),
    }
    tracing::info!("Audio Load Timeout: {}ms", config.audio.load_timeout_ms);
    tracing::info!("Speech Backend: {:?}", config.speech.backend);
    tracing::info!("Voices: {}", config.speech.voices.len());
    if config.speech.backend == SpeechBackendKind::Tts {
        if config.tts.fake {
            tracing::info!("TTS: fake");
        } else {
            tracing::info!("TTS URL: {}", config.tts.url);
            tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
        }
    }
    tracing::info!(
        "Dictation Defaults: interval={}s speed={} pre_rendered={}",
        config.dictation.default_interval_secs,
        config.dictation.default_speed,
        config.dictation.pre_rendered
    );
    tracing::info!("Word Lists: {:?}", config.storage.lists_path);
    if let Some(dir) = &config.storage.words_dir {
        tracing::info!("Words Directory: {:?}", dir);
    }
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("Session Expire: {}s", config.gc.session_expire_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_http_source_without_url() {
        let mut config = AppConfig::default();
        config.audio.source = ClipSourceKind::Http;
        assert!(validate_config(&config).is_err());

        config.audio.base_url = "http://cdn.local".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_dictation_defaults() {
        let mut config = AppConfig::default();
        config.dictation.default_interval_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.dictation.default_speed = 3.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[audio]
source = "http"
base_url = "http://cdn.local"
load_timeout_ms = 0

[speech]
backend = "tts"
voices = [{{ id = "v1", name = "Premium One", lang = "en-US" }}]

[tts]
fake = true
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.audio.source, ClipSourceKind::Http);
        assert_eq!(config.audio.load_timeout(), None);
        assert_eq!(config.speech.backend, SpeechBackendKind::Tts);
        assert_eq!(config.speech.voices.len(), 1);
        assert!(config.tts.fake);
        assert_eq!(config.dictation.default_interval_secs, 10);
    }
}
