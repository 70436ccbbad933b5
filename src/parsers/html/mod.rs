//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作（属性读写、innerHTML、文本替换）
//! - `metadata`: 标题与字符集读取
//! - `selector`: 简易元素选择器
//! - `serializer`: 序列化功能
//! - `utils`: 常量与元素分类

pub mod dom;
pub mod metadata;
pub mod selector;
pub mod serializer;
pub mod utils;

pub use dom::{
    append_html, descendant_elements, find_by_attr, get_node_attr, get_node_name,
    get_parent_node, html_to_dom, inner_html, is_element, is_within, set_inner_html,
    set_node_attr, set_text,
};
pub use metadata::{get_charset, get_title};
pub use selector::Selector;
pub use serializer::serialize_document;
pub use utils::{is_value_control, watched_attributes, LANG_ATTR, WHITESPACES};
