//! Audio Query Handlers

use std::path::{Component, Path};
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioClip;
use crate::application::queries::{GetClip, GetClipResponse};
use crate::application::speech::ClipLibrary;
use crate::domain::audio::ClipPath;

/// GetClip Handler - 读取已缓存的音频
///
/// 预录音频未命中缓存时按需加载；合成语音只从缓存读取
pub struct GetClipHandler {
    library: Arc<ClipLibrary>,
}

impl GetClipHandler {
    pub fn new(library: Arc<ClipLibrary>) -> Self {
        Self { library }
    }

    pub async fn handle(&self, query: GetClip) -> Result<GetClipResponse, ApplicationError> {
        let path = normalize_key(&query.path)
            .map(ClipPath::from_key)
            .ok_or_else(|| ApplicationError::validation(format!("Invalid clip path: {}", query.path)))?;

        let clip = match self.library.cached(&path) {
            Some(clip) => clip,
            None if path.as_str().starts_with("audio/") => self
                .library
                .load(&path)
                .await
                .map_err(|_| ApplicationError::not_found("Audio clip", path.as_str()))?,
            None => return Err(ApplicationError::not_found("Audio clip", path.as_str())),
        };

        Ok(GetClipResponse {
            content_type: content_type(&clip),
            data: clip.data,
        })
    }
}

/// 规范化缓存键：只允许普通路径分量，重复的 `/` 和中间的 `.` 被折叠
fn normalize_key(raw: &str) -> Option<String> {
    let raw = raw.trim_start_matches('/');
    let mut parts = Vec::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

fn content_type(clip: &AudioClip) -> &'static str {
    let hint = clip
        .path
        .extension()
        .unwrap_or(clip.info.codec.as_str())
        .to_lowercase();

    match hint.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "vorbis" => "audio/ogg",
        "flac" => "audio/flac",
        codec if codec.starts_with("pcm") => "audio/wav",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{library, FakeClipStore};

    #[tokio::test]
    async fn test_get_clip_loads_pre_rendered_on_miss() {
        let store = Arc::new(FakeClipStore::with_clips(&["audio/gr23/cat.mp3"]));
        let handler = GetClipHandler::new(Arc::new(library(store)));

        let response = handler
            .handle(GetClip {
                path: "/audio/gr23/cat.mp3".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.content_type, "audio/mpeg");
        assert!(response.data.starts_with(b"FAKE"));
    }

    #[tokio::test]
    async fn test_get_clip_unknown_is_not_found() {
        let store = Arc::new(FakeClipStore::with_clips(&[]));
        let handler = GetClipHandler::new(Arc::new(library(store.clone())));

        let err = handler
            .handle(GetClip {
                path: "speech/0123".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
        assert_eq!(store.fetch_count(), 0);

        assert!(handler
            .handle(GetClip {
                path: "audio/gr23/dog.mp3".into(),
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_get_clip_rejects_parent_segments() {
        let store = Arc::new(FakeClipStore::with_clips(&["audio/gr23/cat.mp3"]));
        let handler = GetClipHandler::new(Arc::new(library(store.clone())));

        for path in ["audio/../secret.mp3", "audio/gr23/../../etc/passwd", "", "/"] {
            let err = handler
                .handle(GetClip { path: path.into() })
                .await
                .unwrap_err();
            assert!(matches!(err, ApplicationError::ValidationError(_)), "{path}");
        }
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_get_clip_variant_spellings_share_cache_entry() {
        let store = Arc::new(FakeClipStore::with_clips(&["audio/gr23/cat.mp3"]));
        let lib = Arc::new(library(store.clone()));
        let handler = GetClipHandler::new(lib.clone());

        let first = handler
            .handle(GetClip {
                path: "audio/gr23/cat.mp3".into(),
            })
            .await
            .unwrap();
        let second = handler
            .handle(GetClip {
                path: "//audio/./gr23//cat.mp3".into(),
            })
            .await
            .unwrap();

        assert_eq!(store.fetch_count(), 1);
        let cached = lib
            .cached(&ClipPath::from_key("audio/gr23/cat.mp3"))
            .unwrap();
        assert_eq!(first.data.as_ptr(), cached.data.as_ptr());
        assert_eq!(second.data.as_ptr(), cached.data.as_ptr());
    }
}
