//! # 解析器模块
//!
//! 这个模块包含HTML文档的解析、查询、修改与序列化功能。
//!
//! # 模块组织
//!
//! - `html` - HTML文档解析、DOM操作、选择器、序列化

pub mod html;

// Re-export commonly used items for convenience
pub use html::{html_to_dom, serialize_document, Selector};
