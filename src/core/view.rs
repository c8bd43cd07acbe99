//! 文章详情视图
//!
//! 视图状态只有两条路径：`Initializing → Loading → Ready` 与
//! `Initializing → Loading → Redirecting`。没有文章标识时视图停留在 `Loading`。
//!
//! 视图持有一个取消令牌表示挂载的生命周期，卸载后不再应用任何请求结果。

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::core::context::{AudioElement, ClipboardError, ViewContext};
use crate::core::controls::{FontDirection, FontSizeLevel, PlaybackRate};
use crate::models::Post;

/// 复制链接成功后的提示
pub const SHARE_NOTICE: &str = "链接已复制！";

/// 视图操作错误
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("文章尚未加载完成")]
    NotReady,

    #[error("无法生成文章链接: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// 视图状态
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Initializing,
    Loading,
    Ready(Post),
    Redirecting { to: String },
}

/// 一次加载的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    Redirected,
    /// 视图已卸载，结果被丢弃
    Abandoned,
    /// 没有文章标识，视图保持加载状态
    MissingId,
}

pub struct PostView {
    ctx: ViewContext,
    id: Option<String>,
    state: ViewState,
    font: FontSizeLevel,
    rate: PlaybackRate,
    audio: Option<AudioElement>,
    lifecycle: CancellationToken,
}

impl PostView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            id: None,
            state: ViewState::Initializing,
            font: FontSizeLevel::default(),
            rate: PlaybackRate::default(),
            audio: None,
            lifecycle: CancellationToken::new(),
        }
    }

    /// 卸载句柄，取消后视图丢弃尚未完成的请求
    pub fn unmount_handle(&self) -> CancellationToken {
        self.lifecycle.clone()
    }

    pub fn unmount(&self) {
        self.lifecycle.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifecycle.is_cancelled()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.state {
            ViewState::Ready(post) => Some(post),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Initializing | ViewState::Loading)
    }

    pub fn font_level(&self) -> FontSizeLevel {
        self.font
    }

    pub fn playback_rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn audio(&self) -> Option<&AudioElement> {
        self.audio.as_ref()
    }

    /// 请求文章并更新状态。
    ///
    /// 每次调用只请求一次，不重试；失败时记录日志并跳转首页，最多产生一次跳转。
    pub async fn load(&mut self, id: Option<&str>) -> LoadOutcome {
        if self.lifecycle.is_cancelled() {
            debug!("视图已卸载，忽略加载请求");
            return LoadOutcome::Abandoned;
        }

        self.state = ViewState::Loading;
        self.audio = None;

        let id = match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                warn!("缺少文章标识，视图保持加载状态");
                self.id = None;
                return LoadOutcome::MissingId;
            }
        };
        self.id = Some(id.clone());

        let api = Arc::clone(&self.ctx.api);
        let result = tokio::select! {
            biased;
            _ = self.lifecycle.cancelled() => {
                debug!("视图已卸载，丢弃文章 {} 的请求", id);
                return LoadOutcome::Abandoned;
            }
            result = api.get_post(&id) => result,
        };

        if self.lifecycle.is_cancelled() {
            debug!("视图已卸载，丢弃文章 {} 的结果", id);
            return LoadOutcome::Abandoned;
        }

        match result {
            Ok(post) => {
                info!("文章加载完成: {} ({})", post.title, post.id);
                self.audio = post
                    .audio_url
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .map(|url| AudioElement {
                        playback_rate: self.rate.as_f64(),
                        ..AudioElement::new(url)
                    });
                self.state = ViewState::Ready(post);
                LoadOutcome::Ready
            }
            Err(err) => {
                error!("文章不存在或加载失败: {}", err);
                let home = self.ctx.home_path.clone();
                self.ctx.navigator.navigate(&home);
                self.state = ViewState::Redirecting { to: home };
                LoadOutcome::Redirected
            }
        }
    }

    /// 调整字号档位，到达边界时不变
    pub fn adjust_font_size(&mut self, direction: FontDirection) -> FontSizeLevel {
        self.font = self.font.step(direction);
        self.font
    }

    /// 设置音频倍速，没有挂载音频时不生效
    pub fn set_playback_rate(&mut self, rate: PlaybackRate) -> bool {
        self.rate = rate;
        match self.audio.as_mut() {
            Some(audio) => {
                audio.playback_rate = rate.as_f64();
                true
            }
            None => false,
        }
    }

    /// 当前文章的规范链接，只对已加载的文章有效。
    ///
    /// 文章标识作为单个路径段写入，其中的 `?`、`#`、`/` 都会被转义。
    pub fn canonical_url(&self) -> Result<Url, ViewError> {
        let post = self.post().ok_or(ViewError::NotReady)?;
        if matches!(post.id.as_str(), "" | "." | "..") {
            return Err(ViewError::InvalidUrl(format!("非法的文章标识: {:?}", post.id)));
        }

        let mut url = self.ctx.site_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ViewError::InvalidUrl(self.ctx.site_url.to_string()))?
            .pop_if_empty()
            .push("posts")
            .push(&post.id);

        Ok(url)
    }

    /// 复制当前链接到剪贴板，成功后显示提示。未就绪的视图不能分享
    pub async fn share(&self) -> Result<Url, ViewError> {
        let url = self.canonical_url()?;

        match self.ctx.clipboard.write_text(url.as_str()).await {
            Ok(()) => {
                self.ctx.notifier.notify(SHARE_NOTICE);
                Ok(url)
            }
            Err(err) => {
                warn!("复制链接失败: {}", err);
                Err(err.into())
            }
        }
    }

    /// 生成用于模板渲染的页面数据，就绪状态下会渲染一次正文
    pub fn page(&self) -> PostPage {
        let font = FontControls {
            level: self.font.level(),
            display_level: self.font.level() + 1,
            class: self.font.class(),
            can_increase: self.font.can_increase(),
            can_decrease: self.font.can_decrease(),
        };
        let back_link = self.ctx.navigator.link(&self.ctx.home_path);

        let post = match &self.state {
            ViewState::Ready(post) => post,
            other => {
                let status = match other {
                    ViewState::Redirecting { .. } => PageStatus::Missing,
                    _ => PageStatus::Loading,
                };
                return PostPage {
                    status,
                    back_link,
                    edit_link: None,
                    font,
                    post: None,
                    content_html: None,
                    audio: None,
                };
            }
        };

        let edit_link = self
            .ctx
            .auth
            .is_admin
            .then(|| self.ctx.navigator.link(&format!("/editor/{}", post.id)));

        let audio = self.audio.as_ref().map(|audio| AudioControls {
            src: audio.src.clone(),
            rates: PlaybackRate::ALL
                .into_iter()
                .map(|rate| RateOption {
                    value: rate.value(),
                    label: rate.label(),
                    selected: rate == self.rate,
                })
                .collect(),
        });

        PostPage {
            status: PageStatus::Ready,
            back_link,
            edit_link,
            font,
            content_html: Some(self.ctx.markdown.render(&post.content)),
            post: Some(post.clone()),
            audio,
        }
    }
}

/// 页面状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Loading,
    Ready,
    Missing,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontControls {
    pub level: u8,
    pub display_level: u8,
    pub class: &'static str,
    pub can_increase: bool,
    pub can_decrease: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateOption {
    pub value: &'static str,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioControls {
    pub src: String,
    pub rates: Vec<RateOption>,
}

/// 文章页的模板数据
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub status: PageStatus,
    pub back_link: String,
    pub edit_link: Option<String>,
    pub font: FontControls,
    pub post: Option<Post>,
    pub content_html: Option<String>,
    pub audio: Option<AudioControls>,
}
