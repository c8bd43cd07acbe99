use pulldown_cmark::{html, Options, Parser};

use crate::core::context::MarkdownRenderer;

/// 将Markdown渲染为HTML
pub fn render(markdown: &str) -> String {
    // 创建Markdown解析选项
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    // 解析Markdown
    let parser = Parser::new_ext(markdown, options);

    // 将解析结果渲染为HTML
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    // 代码块统一加上高亮样式
    html_output
        .replace("<pre><code class=\"language-", "<pre><code class=\"hljs language-")
        .replace("<pre><code>", "<pre><code class=\"hljs\">")
}

/// 基于 pulldown-cmark 的渲染器
#[derive(Debug, Default, Clone, Copy)]
pub struct PulldownRenderer;

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, content: &str) -> String {
        render(content)
    }
}
