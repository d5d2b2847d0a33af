//! HTTP Clip Store - 远程静态音频资源
//!
//! 实现 ClipStorePort trait，GET `{base_url}/{clip_path}`

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::application::ports::{ClipStoreError, ClipStorePort};
use crate::domain::audio::ClipPath;

/// HTTP Clip Store 配置
#[derive(Debug, Clone)]
pub struct HttpClipStoreConfig {
    /// 静态资源基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpClipStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

/// 远程音频资源（只读）
pub struct HttpClipStore {
    client: Client,
    config: HttpClipStoreConfig,
}

impl HttpClipStore {
    pub fn new(config: HttpClipStoreConfig) -> Result<Self, ClipStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClipStoreError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn clip_url(&self, path: &ClipPath) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.as_str().trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ClipStorePort for HttpClipStore {
    async fn fetch(&self, path: &ClipPath) -> Result<Vec<u8>, ClipStoreError> {
        let url = self.clip_url(path);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ClipStoreError::Timeout
            } else {
                ClipStoreError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClipStoreError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(ClipStoreError::NetworkError(format!("HTTP {} for {}", status, url)));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| ClipStoreError::NetworkError(e.to_string()))?
            .to_vec();

        tracing::debug!(url = %url, size = data.len(), "Fetched audio clip");

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_url_joins_cleanly() {
        let store = HttpClipStore::new(HttpClipStoreConfig {
            base_url: "http://cdn.example.com/spell/".into(),
            timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(
            store.clip_url(&ClipPath::from_key("audio/gr23/cat.mp3")),
            "http://cdn.example.com/spell/audio/gr23/cat.mp3"
        );
    }
}
