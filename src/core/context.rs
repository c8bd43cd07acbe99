//! 文章视图依赖的外部协作者。
//!
//! 认证、路由、剪贴板和 Markdown 渲染都由外部负责，这里只定义接口，
//! 并提供开发与测试用的简单实现。

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::core::api::PostApi;

/// 认证上下文，视图只读取其中的管理员标志
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub is_admin: bool,
}

impl AuthContext {
    pub fn admin() -> Self {
        Self { is_admin: true }
    }

    pub fn guest() -> Self {
        Self { is_admin: false }
    }
}

/// 路由协作者
pub trait Navigator: Send + Sync {
    /// 跳转到指定路径
    fn navigate(&self, path: &str);

    /// 生成指向路径的链接
    fn link(&self, path: &str) -> String {
        path.to_string()
    }
}

/// 记录跳转历史的路由实现
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: RwLock<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 到目前为止的全部跳转
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    /// 最近一次跳转
    pub fn last(&self) -> Option<String> {
        self.history().pop()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        debug!("跳转到 {}", path);
        if let Ok(mut history) = self.history.write() {
            history.push(path.to_string());
        }
    }
}

/// Markdown 渲染协作者，假定对任何输入都能给出结果
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, content: &str) -> String;
}

/// 剪贴板错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("剪贴板不可用")]
    Unavailable,

    #[error("写入剪贴板失败: {0}")]
    WriteFailed(String),
}

/// 系统剪贴板
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// 内存中的剪贴板
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: RwLock<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<String> {
        self.content.read().ok().and_then(|content| content.clone())
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut content = self
            .content
            .write()
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        *content = Some(text.to_string());
        Ok(())
    }
}

/// 向用户显示提示
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// 把提示写入日志
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("{}", message);
    }
}

/// 已挂载的音频元素
#[derive(Debug, Clone, PartialEq)]
pub struct AudioElement {
    pub src: String,
    pub playback_rate: f64,
}

impl AudioElement {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            playback_rate: 1.0,
        }
    }
}

/// 视图初始化时显式传入的全部协作者
#[derive(Clone)]
pub struct ViewContext {
    pub api: Arc<dyn PostApi>,
    pub markdown: Arc<dyn MarkdownRenderer>,
    pub navigator: Arc<dyn Navigator>,
    pub clipboard: Arc<dyn Clipboard>,
    pub notifier: Arc<dyn Notifier>,
    pub auth: AuthContext,
    /// 站点地址，用于生成规范链接
    pub site_url: Url,
    /// 加载失败时返回的首页
    pub home_path: String,
}
