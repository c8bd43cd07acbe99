use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use url::Url;

use crate::core::api::{FixtureApi, PostApi};
use crate::core::context::{
    AuthContext, HistoryNavigator, LogNotifier, MemoryClipboard, ViewContext,
};
use crate::core::controls::{FontDirection, PlaybackRate};
use crate::core::view::{LoadOutcome, PostView};
use crate::fixtures::FixtureStore;
use crate::models::Config;
use crate::theme::renderer::ViewRenderer;
use crate::utils::markdown::PulldownRenderer;

/// 预览服务器共享的状态
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FixtureStore>,
    pub api: Arc<dyn PostApi>,
    pub renderer: Arc<ViewRenderer>,
    pub config: Arc<Config>,
    pub site_url: Url,
}

impl AppState {
    pub fn new(config: Config, store: Arc<FixtureStore>) -> Result<Self> {
        let api = FixtureApi::new(Arc::clone(&store)).with_delay(config.fetch_delay());
        let renderer = ViewRenderer::new(config.clone())?;
        let site_url = config.site_url()?;

        Ok(Self {
            store,
            api: Arc::new(api),
            renderer: Arc::new(renderer),
            config: Arc::new(config),
            site_url,
        })
    }

    /// 每个请求都会创建一个新的视图及其协作者
    fn view_context(&self, navigator: Arc<HistoryNavigator>) -> ViewContext {
        ViewContext {
            api: Arc::clone(&self.api),
            markdown: Arc::new(PulldownRenderer),
            navigator,
            clipboard: Arc::new(MemoryClipboard::new()),
            notifier: Arc::new(LogNotifier),
            auth: AuthContext {
                is_admin: self.config.admin,
            },
            site_url: self.site_url.clone(),
            home_path: self.config.home_route(),
        }
    }
}

/// 处理器错误，统一返回 500
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("请求处理失败: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// 文章页的阅读设置
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// 字号档位
    pub font: Option<u8>,
    /// 播放倍速
    pub rate: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/posts/:id", get(post_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let html = state.renderer.render_home(state.store.posts())?;
    Ok(Html(html))
}

async fn post_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ServerError> {
    let navigator = Arc::new(HistoryNavigator::new());
    let mut view = PostView::new(state.view_context(Arc::clone(&navigator)));

    if view.load(Some(&id)).await == LoadOutcome::Redirected {
        let target = navigator
            .last()
            .unwrap_or_else(|| state.config.home_route());
        return Ok(Redirect::to(&target).into_response());
    }

    for _ in 0..query.font.unwrap_or(0) {
        view.adjust_font_size(FontDirection::Increase);
    }

    if let Some(rate) = query.rate.as_deref() {
        match rate.parse::<PlaybackRate>() {
            Ok(rate) => {
                view.set_playback_rate(rate);
            }
            Err(err) => return Ok((StatusCode::BAD_REQUEST, err.to_string()).into_response()),
        }
    }

    let html = state.renderer.render_post(&view.page())?;
    Ok(Html(html).into_response())
}

/// HTTP 预览服务器
pub struct Server {
    state: AppState,
    /// 端口
    port: u16,
}

impl Server {
    /// 创建新的服务器
    pub fn new(state: AppState, port: u16) -> Self {
        Self { state, port }
    }

    /// 启动服务器
    pub async fn start(self) -> Result<()> {
        let app = create_router(self.state);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.port).parse()?;
        info!("Server started at http://localhost:{}", self.port);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_router(config: Config) -> Router {
        let state = AppState::new(config, Arc::new(FixtureStore::new())).unwrap();
        create_router(state)
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_home_page() {
        let (status, body) = get_body(test_router(Config::default()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("唯独恩典：改革宗信仰的核心"));
    }

    #[tokio::test]
    async fn test_post_page() {
        let (status, body) = get_body(test_router(Config::default()), "/posts/1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("唯独恩典：改革宗信仰的核心"));
        assert!(body.contains("收听音频"));
        assert!(!body.contains("edit-link"));
    }

    #[tokio::test]
    async fn test_post_page_as_admin_with_settings() {
        let config = Config {
            admin: true,
            ..Config::default()
        };
        let (status, body) = get_body(test_router(config), "/posts/1?font=5&rate=1.5").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("edit-link"));
        assert!(body.contains("prose-2xl"));
        assert!(body.contains(r#"<option value="1.5" selected>"#));
    }

    #[tokio::test]
    async fn test_unknown_post_redirects_home() {
        let response = test_router(Config::default())
            .oneshot(Request::builder().uri("/posts/999").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_unsupported_rate() {
        let (status, body) = get_body(test_router(Config::default()), "/posts/1?rate=3").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("不支持的播放倍速"));
    }
}
