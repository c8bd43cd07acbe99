use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// 普通读者
    User,
    /// 管理员
    Admin,
}

/// 用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// 显示名称
    pub username: String,
    pub role: UserRole,
    /// 头像地址
    pub avatar: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// 分类结构，通过父分类引用组成一棵树
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// 分类标识
    pub id: String,
    /// 分类名称
    pub name: String,
    /// 父分类
    pub parent_id: Option<String>,
}

impl Category {
    /// 是否为顶级分类
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// 博客文章的基本结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// 文章标识，创建后不可变
    pub id: String,
    /// 文章标题
    pub title: String,
    /// 文章摘要
    pub excerpt: String,
    /// 文章内容（原始Markdown）
    pub content: String,
    /// 封面图片
    pub cover_image: Option<String>,
    /// 音频地址
    pub audio_url: Option<String>,
    /// 作者
    pub author: User,
    /// 文章创建时间
    pub created_at: DateTime<Utc>,
    /// 文章分类
    pub category: Category,
    /// 文章标签
    pub tags: BTreeSet<String>,
    /// 阅读次数
    pub views: u64,
    /// 是否为精选文章
    pub is_featured: bool,
}

impl Post {
    pub fn has_audio(&self) -> bool {
        self.audio_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}
