//! 短语规范化
//!
//! 只用于生成匹配键，写回文档的内容永远不经过这里。

use std::sync::LazyLock;

use regex::Regex;

static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n]+").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\s+").unwrap());
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<]*>").unwrap());

/// 去除首尾空白；`clean` 时再把换行和连续空白折叠为单个空格
pub fn sanitize(text: &str, clean: bool) -> String {
    let trimmed = text.trim();
    if !clean {
        return trimmed.to_string();
    }

    // 单个 \n 不会被 \s\s+ 匹配，所以换行要先单独处理
    let joined = NEWLINES.replace_all(trimmed, " ");
    SPACES.replace_all(&joined, " ").into_owned()
}

/// 去除所有标签，属性值不能携带富文本
pub fn strip_tags(text: &str) -> String {
    TAGS.replace_all(text, "").into_owned()
}
