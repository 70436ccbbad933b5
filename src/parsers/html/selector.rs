//! 简易元素选择器
//!
//! 只支持语言切换需要的几种形式：
//!
//! - `document` — 文档根节点
//! - `*` — 所有元素
//! - `#id` — 按 id 选择
//! - `.class` — 按 class 选择
//! - `tag` — 按标签名选择（不区分大小写）

use markup5ever_rcdom::Handle;

use super::dom::{descendant_elements, get_node_attr, get_node_name};

/// 解析后的选择器
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Document,
    Any,
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    /// 解析选择器字符串，不支持的语法返回 `None`
    pub fn parse(selector: &str) -> Option<Selector> {
        let selector = selector.trim();

        if selector.eq_ignore_ascii_case("document") {
            return Some(Selector::Document);
        }
        if selector == "*" {
            return Some(Selector::Any);
        }
        if let Some(id) = selector.strip_prefix('#') {
            return is_ident(id).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return is_ident(class).then(|| Selector::Class(class.to_string()));
        }

        is_ident(selector).then(|| Selector::Tag(selector.to_ascii_lowercase()))
    }

    fn matches(&self, node: &Handle) -> bool {
        match self {
            Selector::Document => false,
            Selector::Any => true,
            Selector::Id(id) => get_node_attr(node, "id").as_deref() == Some(id.as_str()),
            Selector::Class(class) => get_node_attr(node, "class")
                .map(|value| value.split_ascii_whitespace().any(|c| c == class))
                .unwrap_or(false),
            Selector::Tag(tag) => get_node_name(node)
                .map(|name| name.eq_ignore_ascii_case(tag))
                .unwrap_or(false),
        }
    }

    /// 在 `document` 中按文档顺序查找所有匹配的节点
    pub fn select(&self, document: &Handle) -> Vec<Handle> {
        if *self == Selector::Document {
            return vec![document.clone()];
        }

        descendant_elements(document)
            .into_iter()
            .filter(|node| self.matches(node))
            .collect()
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::html_to_dom;

    const PAGE: &[u8] =
        b"<div id=\"main\" class=\"box wide\"><p class=\"box\">a</p><P>b</P></div>";

    #[test]
    fn parses_supported_forms() {
        assert_eq!(Selector::parse("document"), Some(Selector::Document));
        assert_eq!(Selector::parse(" * "), Some(Selector::Any));
        assert_eq!(Selector::parse("#main"), Some(Selector::Id("main".into())));
        assert_eq!(Selector::parse(".box"), Some(Selector::Class("box".into())));
        assert_eq!(Selector::parse("DIV"), Some(Selector::Tag("div".into())));
    }

    #[test]
    fn rejects_unsupported_forms() {
        assert_eq!(Selector::parse(""), None);
        assert_eq!(Selector::parse("#"), None);
        assert_eq!(Selector::parse("div > p"), None);
        assert_eq!(Selector::parse("[lang=en]"), None);
    }

    #[test]
    fn selects_in_document_order() {
        let dom = html_to_dom(PAGE, "utf-8").unwrap();

        assert_eq!(Selector::Class("box".into()).select(&dom.document).len(), 2);
        assert_eq!(Selector::Tag("p".into()).select(&dom.document).len(), 2);
        assert_eq!(Selector::Id("main".into()).select(&dom.document).len(), 1);
        assert_eq!(Selector::Id("none".into()).select(&dom.document).len(), 0);

        let document = Selector::Document.select(&dom.document);
        assert!(std::rc::Rc::ptr_eq(&document[0], &dom.document));
    }
}
