//! Sound Backend - 发声后端

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{SpeechEnginePort, SpeechRequest};
use crate::domain::session::SpeechRate;
use crate::domain::words::GradeLevel;

use super::AudioSource;

/// 发声参数
#[derive(Debug, Clone, PartialEq)]
pub struct SoundParams {
    pub grade: GradeLevel,
    pub rate: SpeechRate,
    /// 已解析的音色 ID
    pub voice_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    PreRendered,
    Synthesized,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreRendered => f.write_str("pre_rendered"),
            Self::Synthesized => f.write_str("synthesized"),
        }
    }
}

/// 后端发声失败
#[derive(Debug, Clone, PartialEq)]
pub struct BackendFailure {
    pub kind: BackendKind,
    pub reason: String,
}

/// 发声后端
#[derive(Clone)]
pub enum SoundBackend {
    PreRendered(AudioSource),
    Synthesized(Arc<dyn SpeechEnginePort>),
}

impl SoundBackend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::PreRendered(_) => BackendKind::PreRendered,
            Self::Synthesized(_) => BackendKind::Synthesized,
        }
    }

    /// 发声，开始后返回
    pub async fn produce(&self, word: &str, params: &SoundParams) -> Result<BackendKind, BackendFailure> {
        let kind = self.kind();
        let fail = |reason: String| BackendFailure { kind, reason };

        match self {
            Self::PreRendered(source) => {
                let path = source.resolve(word, params.grade);
                let clip = source.load(&path).await.map_err(|e| fail(e.to_string()))?;
                source
                    .play(&clip, params.rate.get())
                    .await
                    .map_err(|e| fail(e.to_string()))?;
            }
            Self::Synthesized(engine) => {
                let request = SpeechRequest::new(word, params.rate.get(), params.voice_id.clone());
                engine.speak(request).map_err(|e| fail(e.to_string()))?;
            }
        }

        Ok(kind)
    }

    /// 停止该后端的声音
    pub fn silence(&self) {
        match self {
            Self::PreRendered(source) => source.halt(),
            Self::Synthesized(engine) => engine.cancel(),
        }
    }
}
