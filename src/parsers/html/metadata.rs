//! HTML元数据读取
//!
//! 读取 `<title>` 与文档声明的字符集，用于输出路径和重新解析。

use markup5ever_rcdom::{Handle, NodeData};

use super::dom::{descendant_elements, get_node_attr, get_node_name};

fn elements_named(document: &Handle, tag: &str) -> Vec<Handle> {
    descendant_elements(document)
        .into_iter()
        .filter(|node| get_node_name(node) == Some(tag))
        .collect()
}

/// 从 `Content-Type` 值中提取字符集
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .map(str::trim)
        .find_map(|part| {
            let (name, value) = part.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"').to_string())
        })
        .filter(|charset| !charset.is_empty())
}

/// 获取文档声明的字符集
///
/// 支持 `<meta charset>` 与 `<meta http-equiv="content-type">` 两种写法。
pub fn get_charset(document: &Handle) -> Option<String> {
    for meta in elements_named(document, "meta") {
        if let Some(charset) = get_node_attr(&meta, "charset") {
            return Some(charset);
        }

        if get_node_attr(&meta, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(content) = get_node_attr(&meta, "content") {
                return charset_from_content_type(&content);
            }
        }
    }

    None
}

/// 获取文档标题
pub fn get_title(document: &Handle) -> Option<String> {
    for title in elements_named(document, "title") {
        for child in title.children.borrow().iter() {
            if let NodeData::Text { ref contents } = child.data {
                return Some(contents.borrow().to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::html_to_dom;

    #[test]
    fn reads_meta_charset() {
        let dom = html_to_dom(
            b"<html><head><meta charset=\"windows-1252\"></head></html>",
            "utf-8",
        )
        .unwrap();
        assert_eq!(get_charset(&dom.document), Some("windows-1252".to_string()));
    }

    #[test]
    fn reads_http_equiv_charset() {
        let dom = html_to_dom(
            b"<head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\"></head>",
            "utf-8",
        )
        .unwrap();
        assert_eq!(get_charset(&dom.document), Some("ISO-8859-1".to_string()));
    }

    #[test]
    fn parses_quoted_content_type_charset() {
        assert_eq!(
            charset_from_content_type("text/html; Charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn missing_metadata_is_none() {
        let dom = html_to_dom(b"<p>no head</p>", "utf-8").unwrap();
        assert_eq!(get_charset(&dom.document), None);
        assert_eq!(get_title(&dom.document), None);
    }

    #[test]
    fn reads_title_text() {
        let dom = html_to_dom(b"<title>Hola Mundo</title><p>x</p>", "utf-8").unwrap();
        assert_eq!(get_title(&dom.document), Some("Hola Mundo".to_string()));
    }
}
