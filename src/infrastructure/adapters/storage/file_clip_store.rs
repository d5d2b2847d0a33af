//! File Clip Store - 本地目录音频资源
//!
//! 实现 ClipStorePort trait，`audio/gr23/cat.mp3` 映射为 `{root}/audio/gr23/cat.mp3`

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ClipStoreError, ClipStorePort};
use crate::domain::audio::ClipPath;

/// 本地目录音频资源（只读）
pub struct FileClipStore {
    /// 资源根目录
    root: PathBuf,
}

impl FileClipStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// 只允许普通路径分量，拒绝 `..` 和绝对路径
    fn file_path(&self, path: &ClipPath) -> Result<PathBuf, ClipStoreError> {
        let relative = Path::new(path.as_str());
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || path.as_str().is_empty() {
            return Err(ClipStoreError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ClipStorePort for FileClipStore {
    async fn fetch(&self, path: &ClipPath) -> Result<Vec<u8>, ClipStoreError> {
        let file_path = self.file_path(path)?;

        let data = fs::read(&file_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClipStoreError::NotFound(path.to_string()),
            _ => ClipStoreError::IoError(e.to_string()),
        })?;

        tracing::debug!(
            path = %file_path.display(),
            size = data.len(),
            "Read audio clip"
        );

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_existing_clip() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("audio/gr23")).unwrap();
        std::fs::write(dir.path().join("audio/gr23/cat.mp3"), b"clip").unwrap();

        let store = FileClipStore::new(dir.path());
        let data = store
            .fetch(&ClipPath::from_key("audio/gr23/cat.mp3"))
            .await
            .unwrap();
        assert_eq!(data, b"clip");
    }

    #[tokio::test]
    async fn test_missing_clip_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FileClipStore::new(dir.path());

        let err = store
            .fetch(&ClipPath::from_key("audio/gr23/nope.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileClipStore::new(dir.path());

        for key in ["../secret.mp3", "/etc/passwd", "audio/../../x.mp3"] {
            let err = store.fetch(&ClipPath::from_key(key)).await.unwrap_err();
            assert!(matches!(err, ClipStoreError::InvalidPath(_)), "{}", key);
        }
    }
}
