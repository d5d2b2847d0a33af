//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::DictationDefaults;
use crate::domain::audio::{VoiceProfile, DEFAULT_CLIP_EXTENSION};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 预录音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 合成语音配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 听写默认值
    #[serde(default)]
    pub dictation: DictationConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// GC 配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（客户端据此拼接音频 URL）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }

    /// 音频接口的 URL 前缀
    pub fn clip_base_url(&self) -> String {
        format!("{}/api/clip", self.public_base_url().trim_end_matches('/'))
    }
}

/// 预录音频来源
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipSourceKind {
    /// 本地目录
    #[default]
    File,
    /// 远程 HTTP 服务
    Http,
}

/// 预录音频配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    #[serde(default)]
    pub source: ClipSourceKind,

    /// 包含 `audio/` 目录的根目录（source = file）
    #[serde(default = "default_audio_dir")]
    pub dir: PathBuf,

    /// 音频服务 Base URL（source = http）
    #[serde(default)]
    pub base_url: String,

    /// 音频文件扩展名
    #[serde(default = "default_extension")]
    pub extension: String,

    /// 单个音频加载超时（毫秒），0 表示不限制
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,

    /// HTTP 请求超时（秒）
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_extension() -> String {
    DEFAULT_CLIP_EXTENSION.to_string()
}

fn default_load_timeout_ms() -> u64 {
    5000
}

fn default_fetch_timeout() -> u64 {
    10
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            source: ClipSourceKind::default(),
            dir: default_audio_dir(),
            base_url: String::new(),
            extension: default_extension(),
            load_timeout_ms: default_load_timeout_ms(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl AudioConfig {
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_ms > 0).then(|| Duration::from_millis(self.load_timeout_ms))
    }
}

/// 合成语音执行位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackendKind {
    /// 浏览器端朗读
    #[default]
    Client,
    /// 服务端 TTS
    Tts,
}

/// 合成语音配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub backend: SpeechBackendKind,

    /// 可选音色列表
    #[serde(default = "default_voices")]
    pub voices: Vec<VoiceProfile>,
}

fn default_voices() -> Vec<VoiceProfile> {
    vec![
        VoiceProfile::new("alex", "Alex", "en-US"),
        VoiceProfile::new("samantha", "Samantha", "en-US"),
        VoiceProfile::new("daniel", "Daniel", "en-GB"),
    ]
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackendKind::default(),
            voices: default_voices(),
        }
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 使用本地假 TTS（生成静音 WAV）
    #[serde(default)]
    pub fake: bool,
}

fn default_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tts_timeout() -> u64 {
    30
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
            max_retries: 0,
            fake: false,
        }
    }
}

/// 听写默认值
#[derive(Debug, Clone, Deserialize)]
pub struct DictationConfig {
    #[serde(default = "default_interval")]
    pub default_interval_secs: u32,

    #[serde(default = "default_speed")]
    pub default_speed: f32,

    /// 是否优先使用预录音频
    #[serde(default = "default_pre_rendered")]
    pub pre_rendered: bool,
}

fn default_interval() -> u32 {
    10
}

fn default_speed() -> f32 {
    1.0
}

fn default_pre_rendered() -> bool {
    true
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            default_interval_secs: default_interval(),
            default_speed: default_speed(),
            pre_rendered: default_pre_rendered(),
        }
    }
}

impl From<&DictationConfig> for DictationDefaults {
    fn from(config: &DictationConfig) -> Self {
        DictationDefaults {
            interval_secs: config.default_interval_secs,
            speed: config.default_speed,
            pre_rendered: config.pre_rendered,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 单词表数据库路径
    #[serde(default = "default_lists_path")]
    pub lists_path: PathBuf,

    /// 词库目录（包含 gr23.txt / gr45.txt），未设置时使用内置词库
    #[serde(default)]
    pub words_dir: Option<PathBuf>,
}

fn default_lists_path() -> PathBuf {
    PathBuf::from("data/lists.sled")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            lists_path: default_lists_path(),
            words_dir: None,
        }
    }
}

/// GC（垃圾回收）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动 GC
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// GC 间隔时间（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// Session 过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub session_expire_secs: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    300 // 5 分钟
}

fn default_session_expire() -> u64 {
    3600 // 1 小时
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            session_expire_secs: default_session_expire(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5060);
        assert_eq!(config.audio.source, ClipSourceKind::File);
        assert_eq!(config.audio.extension, "mp3");
        assert_eq!(config.speech.backend, SpeechBackendKind::Client);
        assert_eq!(config.dictation.default_interval_secs, 10);
    }

    #[test]
    fn test_clip_base_url() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5060");
        assert_eq!(config.clip_base_url(), "http://localhost:5060/api/clip");

        let config = ServerConfig {
            base_url: Some("https://dictation.example.com/".into()),
            ..Default::default()
        };
        assert_eq!(config.clip_base_url(), "https://dictation.example.com/api/clip");
    }

    #[test]
    fn test_load_timeout_zero_disables() {
        let mut audio = AudioConfig::default();
        assert_eq!(audio.load_timeout(), Some(Duration::from_millis(5000)));
        audio.load_timeout_ms = 0;
        assert_eq!(audio.load_timeout(), None);
    }
}
