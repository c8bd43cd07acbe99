use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::utils::ensure_leading_slash;

/// 配置文件名
pub const CONFIG_FILE: &str = "_config.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 站点标题
    pub title: String,
    /// 站点地址，用于生成文章的规范链接
    pub url: String,
    /// 网站根目录
    pub root: String,
    /// 加载失败时跳转的首页路径
    pub home_path: String,
    /// 预览服务器端口
    pub port: u16,
    /// 预览时是否以管理员身份浏览
    pub admin: bool,
    /// 模拟的文章请求延迟（毫秒）
    pub fetch_delay_ms: Option<u64>,
    /// 日志级别
    pub log_level: Option<String>,
    /// 日期格式
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "恩典书房".to_string(),
            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            home_path: "/".to_string(),
            port: 4000,
            admin: false,
            fetch_delay_ms: None,
            log_level: None,
            date_format: "%Y年%-m月%-d日".to_string(),
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }

    /// 加载配置的别名
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_file(path)
    }

    /// 从站点目录加载配置，不存在时使用默认配置
    pub fn load_or_default(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))?;
        Ok(())
    }

    /// 保存配置的别名
    pub fn save(&self, path: &Path) -> Result<()> {
        self.save_to_file(path)
    }

    /// 解析站点地址
    pub fn site_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url).with_context(|| format!("无效的站点地址: {}", self.url))?;
        Ok(url)
    }

    /// 首页路由，总是以斜杠开头
    pub fn home_route(&self) -> String {
        ensure_leading_slash(&self.home_path)
    }

    pub fn fetch_delay(&self) -> Option<Duration> {
        self.fetch_delay_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_fields_use_defaults() -> Result<()> {
        let config: Config = serde_yaml::from_str("title: 测试站点\nport: 8080\n")?;
        assert_eq!(config.title, "测试站点");
        assert_eq!(config.port, 8080);
        assert_eq!(config.home_path, "/");
        assert!(!config.admin);
        assert!(config.fetch_delay().is_none());

        let config: Config = serde_yaml::from_str("home_path: archives\n")?;
        assert_eq!(config.home_route(), "/archives");
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);

        let config = Config {
            admin: true,
            fetch_delay_ms: Some(250),
            ..Config::default()
        };
        config.save(&path)?;

        let loaded = Config::load_or_default(dir.path())?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.fetch_delay(), Some(Duration::from_millis(250)));
        Ok(())
    }

    #[test]
    fn test_load_or_default_without_file() -> Result<()> {
        let dir = TempDir::new()?;
        assert_eq!(Config::load_or_default(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_site_url() {
        let config = Config {
            url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.site_url().is_err());
    }
}
