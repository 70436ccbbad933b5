use markup5ever_rcdom::Handle;

use super::dom::{get_node_attr, get_node_name};

/// 标记元素语言的属性名
pub const LANG_ATTR: &str = "lang";

/// 默认参与翻译的属性
pub const DEFAULT_WATCHED_ATTRS: &[&str] = &["title", "alt", "href", "placeholder", "src"];

/// 按 value 翻译的 input 类型
pub const VALUE_INPUT_TYPES: &[&str] = &["button", "submit", "reset", "hidden"];

/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// 合并默认属性与自定义属性，排序并去重
pub fn watched_attributes(extra: &[String]) -> Vec<String> {
    let mut attrs: Vec<String> = DEFAULT_WATCHED_ATTRS
        .iter()
        .map(|a| a.to_string())
        .chain(extra.iter().map(|a| a.trim().to_ascii_lowercase()))
        .filter(|a| !a.is_empty())
        .collect();
    attrs.sort();
    attrs.dedup();
    attrs
}

/// 判断元素是否为按 value 翻译的按钮类控件
pub fn is_value_control(node: &Handle) -> bool {
    match get_node_name(node) {
        Some("button") => true,
        Some("input") => get_node_attr(node, "type")
            .map(|t| {
                let t = t.trim_matches(WHITESPACES);
                VALUE_INPUT_TYPES.iter().any(|v| t.eq_ignore_ascii_case(v))
            })
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::{descendant_elements, html_to_dom};

    #[test]
    fn merges_sorts_and_dedups() {
        let attrs = watched_attributes(&["data-tip".into(), "TITLE".into(), " ".into()]);
        assert_eq!(
            attrs,
            vec!["alt", "data-tip", "href", "placeholder", "src", "title"]
        );
    }

    #[test]
    fn detects_value_controls() {
        let dom = html_to_dom(
            b"<button>b</button><input type=\"Submit\"><input type=\"text\"><input><a>x</a>\
              <input type=\" hidden \"><input type=\"RESET\"><input type=\"button\">",
            "utf-8",
        )
        .unwrap();
        let flags: Vec<bool> = descendant_elements(&dom.document)
            .iter()
            .filter(|n| matches!(get_node_name(n), Some("button" | "input" | "a")))
            .map(is_value_control)
            .collect();

        assert_eq!(
            flags,
            vec![true, true, false, false, false, true, true, true]
        );
    }
}
