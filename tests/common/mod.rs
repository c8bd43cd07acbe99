// 测试用的协作者实现
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use url::Url;

use post_reader::core::api::{ApiError, FixtureApi, PostApi};
use post_reader::core::context::{
    AuthContext, Clipboard, ClipboardError, HistoryNavigator, MarkdownRenderer, MemoryClipboard,
    Notifier, ViewContext,
};
use post_reader::models::Post;
use post_reader::utils::markdown::PulldownRenderer;
use post_reader::FixtureStore;

/// 记录调用次数的 Markdown 渲染器
#[derive(Default)]
pub struct CountingMarkdown {
    calls: AtomicUsize,
}

impl CountingMarkdown {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MarkdownRenderer for CountingMarkdown {
    fn render(&self, content: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        PulldownRenderer.render(content)
    }
}

/// 总是返回网络错误
pub struct OfflineApi;

#[async_trait]
impl PostApi for OfflineApi {
    async fn get_post(&self, _id: &str) -> Result<Post, ApiError> {
        Err(ApiError::Transport {
            message: "connection refused".to_string(),
        })
    }
}

/// 在放行之前一直挂起的请求
pub struct GatedApi {
    inner: FixtureApi,
    gate: Arc<Notify>,
}

impl GatedApi {
    pub fn new(gate: Arc<Notify>) -> Self {
        Self {
            inner: FixtureApi::new(Arc::new(FixtureStore::new())),
            gate,
        }
    }
}

#[async_trait]
impl PostApi for GatedApi {
    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        self.gate.notified().await;
        self.inner.get_post(id).await
    }
}

/// 按请求的标识返回文章，用于检查标识如何写入链接
pub struct EchoApi;

#[async_trait]
impl PostApi for EchoApi {
    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let mut post = FixtureStore::new()
            .post("1")
            .cloned()
            .ok_or_else(|| ApiError::NotFound { id: id.to_string() })?;
        post.id = id.to_string();
        Ok(post)
    }
}

/// 返回结果前先卸载视图，模拟结果在卸载之后到达
#[derive(Default)]
pub struct UnmountingApi {
    pub handle: Mutex<Option<CancellationToken>>,
}

#[async_trait]
impl PostApi for UnmountingApi {
    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        if let Some(handle) = self.handle.lock().unwrap().as_ref() {
            handle.cancel();
        }
        FixtureStore::new()
            .post(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound { id: id.to_string() })
    }
}

/// 拒绝写入的剪贴板
pub struct DeniedClipboard;

#[async_trait]
impl Clipboard for DeniedClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::WriteFailed("permission denied".to_string()))
    }
}

/// 记录全部提示
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// 测试夹具，保留各个协作者的具体类型以便断言
pub struct Harness {
    pub markdown: Arc<CountingMarkdown>,
    pub navigator: Arc<HistoryNavigator>,
    pub clipboard: Arc<MemoryClipboard>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            markdown: Arc::new(CountingMarkdown::default()),
            navigator: Arc::new(HistoryNavigator::new()),
            clipboard: Arc::new(MemoryClipboard::new()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn context(&self, api: Arc<dyn PostApi>, auth: AuthContext) -> ViewContext {
        ViewContext {
            api,
            markdown: self.markdown.clone(),
            navigator: self.navigator.clone(),
            clipboard: self.clipboard.clone(),
            notifier: self.notifier.clone(),
            auth,
            site_url: Url::parse("http://localhost:4000").unwrap(),
            home_path: "/".to_string(),
        }
    }

    pub fn fixture_context(&self) -> ViewContext {
        self.context(fixture_api(), AuthContext::guest())
    }
}

pub fn fixture_api() -> Arc<dyn PostApi> {
    Arc::new(FixtureApi::new(Arc::new(FixtureStore::new())))
}
