use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, Level};

use crate::core::api::FixtureApi;
use crate::core::context::{
    AuthContext, HistoryNavigator, LogNotifier, MemoryClipboard, ViewContext,
};
use crate::core::controls::{FontDirection, PlaybackRate};
use crate::core::server::{AppState, Server};
use crate::core::view::{LoadOutcome, PostView};
use crate::fixtures::FixtureStore;
use crate::models::config::{Config, CONFIG_FILE};
use crate::theme::renderer::ViewRenderer;
use crate::utils::markdown::PulldownRenderer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 指定站点目录
    #[arg(short, long, default_value = ".", global = true)]
    pub path: PathBuf,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 日志级别：命令行优先，其次是配置文件
    pub fn log_level(&self) -> Level {
        if self.verbose {
            return Level::DEBUG;
        }

        Config::load_or_default(&self.path)
            .ok()
            .and_then(|config| config.log_level)
            .and_then(|level| Level::from_str(&level).ok())
            .unwrap_or(Level::INFO)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写入默认配置文件
    Init(InitArgs),

    /// 渲染一篇文章
    Show(ShowArgs),

    /// 列出全部文章
    List(ListArgs),

    /// 显示分类树
    Categories,

    /// 启动本地预览服务器
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// 站点标题
    #[arg(short, long)]
    pub title: Option<String>,

    /// 覆盖已有的配置文件
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// 文章标识
    pub id: String,

    /// 以管理员身份浏览
    #[arg(long)]
    pub admin: bool,

    /// 字号档位（0-2）
    #[arg(short, long, default_value_t = 0)]
    pub font: u8,

    /// 播放倍速
    #[arg(short, long)]
    pub rate: Option<String>,

    /// 复制文章链接
    #[arg(long)]
    pub share: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// 以 JSON 格式输出
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ServeArgs {
    /// 服务器端口
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// 执行命令
pub async fn execute(cli: Cli) -> Result<()> {
    let site_path = cli.path.clone();
    let store = Arc::new(FixtureStore::new());

    match cli.command {
        Commands::Init(args) => init(&site_path, &args)?,
        Commands::Show(args) => {
            let config = Config::load_or_default(&site_path)?;
            show(config, store, args).await?;
        }
        Commands::List(args) => list(&store, &args, &mut io::stdout().lock())?,
        Commands::Categories => categories(&store),
        Commands::Serve(args) => {
            let config = Config::load_or_default(&site_path)?;
            let port = args.port.unwrap_or(config.port);
            let state = AppState::new(config, store)?;
            Server::new(state, port).start().await?;
        }
    }

    Ok(())
}

fn init(site_path: &Path, args: &InitArgs) -> Result<()> {
    let config_path = site_path.join(CONFIG_FILE);
    if config_path.exists() && !args.force {
        bail!("配置文件已存在: {}（使用 --force 覆盖）", config_path.display());
    }

    std::fs::create_dir_all(site_path)?;

    let mut config = Config::default();
    if let Some(title) = &args.title {
        config.title = title.clone();
    }
    config.save(&config_path)?;

    info!("已写入配置文件: {}", config_path.display());
    Ok(())
}

async fn show(config: Config, store: Arc<FixtureStore>, args: ShowArgs) -> Result<()> {
    let navigator = Arc::new(HistoryNavigator::new());
    let api = FixtureApi::new(Arc::clone(&store)).with_delay(config.fetch_delay());

    let ctx = ViewContext {
        api: Arc::new(api),
        markdown: Arc::new(PulldownRenderer),
        navigator: navigator.clone(),
        clipboard: Arc::new(MemoryClipboard::new()),
        notifier: Arc::new(LogNotifier),
        auth: AuthContext {
            is_admin: args.admin || config.admin,
        },
        site_url: config.site_url()?,
        home_path: config.home_route(),
    };

    let mut view = PostView::new(ctx);
    match view.load(Some(&args.id)).await {
        LoadOutcome::Ready => {}
        LoadOutcome::Redirected => {
            let target = navigator.last().unwrap_or_default();
            println!(
                "{} {}",
                format!("文章 {} 不存在，已返回", args.id).yellow(),
                target.bright_white()
            );
            return Ok(());
        }
        LoadOutcome::MissingId => bail!("缺少文章标识"),
        LoadOutcome::Abandoned => return Ok(()),
    }

    for _ in 0..args.font {
        view.adjust_font_size(FontDirection::Increase);
    }
    if let Some(rate) = args.rate.as_deref() {
        view.set_playback_rate(rate.parse::<PlaybackRate>()?);
    }

    let renderer = ViewRenderer::new(config)?;
    println!("{}", renderer.render_post(&view.page())?);

    if args.share {
        let url = view.share().await?;
        println!("{} {}", "已复制:".bright_green(), url);
    }

    Ok(())
}

fn list(store: &FixtureStore, args: &ListArgs, out: &mut impl Write) -> Result<()> {
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(store.posts())?)?;
        return Ok(());
    }

    for post in store.posts() {
        let featured = if post.is_featured {
            "★".bright_yellow().to_string()
        } else {
            " ".to_string()
        };
        writeln!(
            out,
            "{} {:>3}  {}  {}  {}",
            featured,
            post.id.bright_cyan(),
            post.title.bright_white(),
            post.category.name.green(),
            format!("{} 次阅读", post.views).dimmed()
        )?;
    }

    Ok(())
}

fn categories(store: &FixtureStore) {
    for root in store.root_categories() {
        println!("{} {}", root.id.bright_cyan(), root.name.bright_white());
        for child in store.children(&root.id) {
            println!("  └─ {} {}", child.id.cyan(), child.name);
        }
    }
}
