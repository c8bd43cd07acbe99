/// 确保路径以斜杠结尾
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// 确保路径以斜杠开头
pub fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

pub mod markdown;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slashes() {
        assert_eq!(ensure_trailing_slash("/blog"), "/blog/");
        assert_eq!(ensure_trailing_slash("/"), "/");
        assert_eq!(ensure_leading_slash("posts/1"), "/posts/1");
        assert_eq!(ensure_leading_slash("/posts/1"), "/posts/1");
    }
}
