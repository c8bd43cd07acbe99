//! 开发阶段使用的静态数据
//!
//! 一个用户、七个分类和六篇文章，字段都是字面值，只提供读取。

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};

use crate::models::{Category, Post, User, UserRole};

/// 只读的静态数据集
#[derive(Debug, Clone)]
pub struct FixtureStore {
    user: User,
    categories: Vec<Category>,
    posts: Vec<Post>,
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureStore {
    pub fn new() -> Self {
        let user = mock_user();
        let categories = mock_categories();
        let posts = mock_posts(&user, &categories);
        Self {
            user,
            categories,
            posts,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// 顶级分类
    pub fn root_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|category| category.is_root())
    }

    /// 直接子分类
    pub fn children<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a Category> {
        self.categories
            .iter()
            .filter(move |category| category.parent_id.as_deref() == Some(parent_id))
    }

    /// 从指定分类沿父引用走到根分类，返回的路径以起点开头、以根结尾。
    ///
    /// 这一层不保证分类树无环，遇到重复节点或悬空的父引用时停止。
    pub fn category_path(&self, id: &str) -> Vec<&Category> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.category(id);

        while let Some(category) = current {
            if !seen.insert(category.id.as_str()) {
                break;
            }
            path.push(category);
            current = category
                .parent_id
                .as_deref()
                .and_then(|parent| self.category(parent));
        }

        path
    }
}

fn at(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|tag| tag.to_string()).collect()
}

fn mock_user() -> User {
    User {
        id: "u1".to_string(),
        username: "恩典编辑部".to_string(),
        role: UserRole::Admin,
        avatar: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=200".to_string(),
    }
}

fn mock_categories() -> Vec<Category> {
    let category = |id: &str, name: &str, parent: Option<&str>| Category {
        id: id.to_string(),
        name: name.to_string(),
        parent_id: parent.map(str::to_string),
    };

    vec![
        category("c1", "教义", None),
        category("c2", "基督论", Some("c1")),
        category("c3", "救恩论", Some("c1")),
        category("c4", "教会历史", None),
        category("c5", "宗教改革", Some("c4")),
        category("c6", "灵修生活", None),
        category("c7", "祷告", Some("c6")),
    ]
}

fn mock_posts(author: &User, categories: &[Category]) -> Vec<Post> {
    let category = |id: &str| {
        categories
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .unwrap_or_else(|| Category {
                id: id.to_string(),
                name: id.to_string(),
                parent_id: None,
            })
    };

    vec![
        Post {
            id: "1".to_string(),
            title: "唯独恩典：改革宗信仰的核心".to_string(),
            excerpt: "人得救不是出于自己，乃是神所赐的。本文从圣经与信条出发，梳理“唯独恩典”的含义。".to_string(),
            content: r#"## 什么是“唯独恩典”

> 你们得救是本乎恩，也因着信；这并不是出于自己，乃是神所赐的。（以弗所书 2:8）

宗教改革的五个“唯独”中，**唯独恩典**回答的是：人凭什么得救？

1. 人在罪中无力自救
2. 神主动施恩拣选
3. 基督成就救赎之工

### 信条中的表述

《威斯敏斯德信条》第十章论到“有效的呼召”，强调这呼召*完全出于神白白的恩典*。

| 信条 | 年份 |
| --- | --- |
| 海德堡要理问答 | 1563 |
| 多特信经 | 1619 |
| 威斯敏斯德信条 | 1646 |
"#
            .to_string(),
            cover_image: Some(
                "https://images.unsplash.com/photo-1504052434569-70ad5836ab65?w=1600".to_string(),
            ),
            audio_url: Some("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3".to_string()),
            author: author.clone(),
            created_at: at(1710057600),
            category: category("c3"),
            tags: tags(&["五个唯独", "恩典", "救恩"]),
            views: 1280,
            is_featured: true,
        },
        Post {
            id: "2".to_string(),
            title: "真神真人：基督的双重本性".to_string(),
            excerpt: "迦克墩信经如何表述基督的神性与人性？".to_string(),
            content: r#"## 迦克墩的界限

主后 451 年的迦克墩会议宣告，基督的两性*不相混乱、不相交换、不能分开、不能离散*。

- 完全的神
- 完全的人
- 一个位格
"#
            .to_string(),
            cover_image: Some(
                "https://images.unsplash.com/photo-1473177104440-ffee2f376098?w=1600".to_string(),
            ),
            audio_url: None,
            author: author.clone(),
            created_at: at(1708248600),
            category: category("c2"),
            tags: tags(&["基督论", "信经"]),
            views: 864,
            is_featured: false,
        },
        Post {
            id: "3".to_string(),
            title: "马丁·路德与九十五条论纲".to_string(),
            excerpt: "1517 年 10 月 31 日，维滕堡城堡教堂的大门上贴出了一份拉丁文论纲。".to_string(),
            content: r#"## 维滕堡的一扇门

路德最初只想发起一场学术辩论，论纲的第一条写道：

> 我们的主和师傅耶稣基督说“你们应当悔改”，是要信徒一生不断地悔改。

这份论纲借着印刷术迅速传遍德意志。
"#
            .to_string(),
            cover_image: Some(
                "https://images.unsplash.com/photo-1519491050282-cf00c82424b4?w=1600".to_string(),
            ),
            audio_url: Some("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3".to_string()),
            author: author.clone(),
            created_at: at(1698746400),
            category: category("c5"),
            tags: tags(&["路德", "宗教改革"]),
            views: 2310,
            is_featured: true,
        },
        Post {
            id: "4".to_string(),
            title: "海德堡要理问答导读".to_string(),
            excerpt: "“你在生时和死时唯一的安慰是什么？”".to_string(),
            content: r#"## 第一问

**问：** 你在生时和死时唯一的安慰是什么？

**答：** 我无论是生是死，身体灵魂都不属于自己，而是属于我信实的救主耶稣基督。

全书分为三部分：

1. 人的罪与悲惨
2. 人的得救
3. 人当如何感恩
"#
            .to_string(),
            cover_image: Some(
                "https://images.unsplash.com/photo-1457369804613-52c61a468e7d?w=1600".to_string(),
            ),
            audio_url: None,
            author: author.clone(),
            created_at: at(1704636000),
            category: category("c1"),
            tags: tags(&["要理问答", "教义"]),
            views: 540,
            is_featured: false,
        },
        Post {
            id: "5".to_string(),
            title: "清教徒的祷告生活".to_string(),
            excerpt: "从《异象之谷》看清教徒如何在祷告中亲近神。".to_string(),
            content: r#"## 异象之谷

清教徒的祷告常常以谦卑的认罪开始，以对恩典的惊叹结束。

- [x] 晨祷
- [x] 读经
- [ ] 晚祷默想
"#
            .to_string(),
            cover_image: None,
            audio_url: None,
            author: author.clone(),
            created_at: at(1701501300),
            category: category("c7"),
            tags: tags(&["清教徒", "祷告"]),
            views: 312,
            is_featured: false,
        },
        Post {
            id: "6".to_string(),
            title: "加尔文《基督教要义》简介".to_string(),
            excerpt: "认识神与认识自己，是一切智慧的总和。".to_string(),
            content: r#"## 两种认识

> 我们所拥有的一切智慧，几乎都包含两部分：认识神和认识自己。

《基督教要义》初版于 1536 年，最终版于 1559 年完成，共四卷。
"#
            .to_string(),
            cover_image: Some(
                "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=1600".to_string(),
            ),
            audio_url: Some("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3".to_string()),
            author: author.clone(),
            created_at: at(1700510400),
            category: category("c5"),
            tags: tags(&["加尔文", "基督教要义"]),
            views: 1675,
            is_featured: false,
        },
    ]
}
