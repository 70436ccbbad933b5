//! # langswitch
//!
//! 在已渲染的HTML文档上原地切换语言：按词典替换可见文本、属性与按钮值，
//! 并在文档后续变化时保持同步。
//!
//! ## 模块组织
//!
//! - `core` - 文档级处理流程（读取、解析、切换、序列化）
//! - `env` - 类型安全的环境变量
//! - `parsers` - HTML解析、DOM操作、选择器、序列化
//! - `translation` - 语言切换引擎

pub mod core;
pub mod env;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use parsers::*;
pub use translation::{LanguageSwitcher, SwitcherConfig, TranslationError, TranslationResult};
