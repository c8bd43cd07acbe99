use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::fixtures::FixtureStore;
use crate::models::Post;

/// 文章请求错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("文章不存在: {id}")]
    NotFound { id: String },

    #[error("请求失败: {message}")]
    Transport { message: String },
}

/// 文章数据来源
#[async_trait]
pub trait PostApi: Send + Sync {
    /// 按标识获取完整文章
    async fn get_post(&self, id: &str) -> Result<Post, ApiError>;
}

/// 基于静态数据的文章来源，可选模拟网络延迟
#[derive(Debug, Clone)]
pub struct FixtureApi {
    store: Arc<FixtureStore>,
    delay: Option<Duration>,
}

impl FixtureApi {
    pub fn new(store: Arc<FixtureStore>) -> Self {
        Self { store, delay: None }
    }

    pub fn with_delay(mut self, delay: Option<Duration>) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl PostApi for FixtureApi {
    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        debug!("从静态数据读取文章: {}", id);
        self.store
            .post(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_api_lookup() {
        let api = FixtureApi::new(Arc::new(FixtureStore::new()));

        let post = api.get_post("3").await.unwrap();
        assert_eq!(post.title, "马丁·路德与九十五条论纲");

        let err = api.get_post("999").await.unwrap_err();
        assert_eq!(err, ApiError::NotFound { id: "999".to_string() });
        assert_eq!(err.to_string(), "文章不存在: 999");
    }

    #[tokio::test]
    async fn test_fixture_api_with_delay() {
        let api = FixtureApi::new(Arc::new(FixtureStore::new()))
            .with_delay(Some(Duration::from_millis(5)));
        assert!(api.get_post("1").await.is_ok());
    }
}
