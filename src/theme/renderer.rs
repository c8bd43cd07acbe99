use anyhow::{anyhow, Result};
use chrono::DateTime;
use std::collections::HashMap;
use tera::{Context as TeraContext, Tera};
use tracing::{debug, error};

use crate::core::view::PostPage;
use crate::models::config::Config;
use crate::models::Post;
use crate::utils::ensure_trailing_slash;

// 嵌入的页面模板
mod templates {
    pub const LAYOUT_HTML: &str = include_str!("../../embed/templates/layout.html");
    pub const POST_HTML: &str = include_str!("../../embed/templates/post.html");
    pub const HOME_HTML: &str = include_str!("../../embed/templates/home.html");
}

/// 页面渲染器，把视图数据渲染为HTML
#[derive(Clone)]
pub struct ViewRenderer {
    /// 模板引擎
    tera: Tera,
    /// 站点配置
    config: Config,
}

impl ViewRenderer {
    /// 创建新的渲染器
    pub fn new(config: Config) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", templates::LAYOUT_HTML),
            ("post.html", templates::POST_HTML),
            ("home.html", templates::HOME_HTML),
        ])?;

        // 注册过滤器
        Self::register_filters(&mut tera);

        Ok(ViewRenderer { tera, config })
    }

    /// 注册模板过滤器
    fn register_filters(tera: &mut Tera) {
        // 注册日期格式化过滤器
        tera.register_filter("date_format", Self::date_format_filter);
    }

    /// 获取可用的布局列表
    pub fn available_layouts(&self) -> Vec<String> {
        self.tera.get_template_names().map(String::from).collect()
    }

    /// 渲染文章详情页
    pub fn render_post(&self, page: &PostPage) -> Result<String> {
        let mut context = TeraContext::from_serialize(page)?;
        self.insert_site(&mut context);
        self.render_template("post.html", &context)
    }

    /// 渲染首页文章列表
    pub fn render_home(&self, posts: &[Post]) -> Result<String> {
        let mut context = TeraContext::new();
        context.insert("posts", posts);
        self.insert_site(&mut context);
        self.render_template("home.html", &context)
    }

    fn insert_site(&self, context: &mut TeraContext) {
        context.insert("site_title", &self.config.title);
        context.insert("root", &ensure_trailing_slash(&self.config.root));
        context.insert("date_format", &self.config.date_format);
    }

    pub fn render_template(&self, template_name: &str, context: &TeraContext) -> Result<String> {
        debug!("渲染模板 {}", template_name);
        match self.tera.render(template_name, context) {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("模板渲染失败: {}", e);
                Err(anyhow!(e))
            }
        }
    }

    fn date_format_filter(
        value: &tera::Value,
        args: &HashMap<String, tera::Value>,
    ) -> tera::Result<tera::Value> {
        if let Some(date) = value.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()) {
            let format = args
                .get("format")
                .and_then(|f| f.as_str())
                .unwrap_or("%Y-%m-%d");
            Ok(tera::Value::String(date.format(format).to_string()))
        } else {
            Ok(value.clone())
        }
    }
}
