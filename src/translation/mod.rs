//! 语言切换模块
//!
//! 在已渲染的文档树上原地切换语言：
//! - **sanitizer**: 匹配键的规范化
//! - **dictionary**: 有序词典与交叉词典
//! - **matcher**: 单个元素的匹配与重写
//! - **translator**: 子树遍历与回退
//! - **queue**: 串行执行引擎任务
//! - **engine**: 语言切换的协调者
//! - **source** / **storage** / **observer**: 词典来源、语言持久化、文档变更监视
//! - **config** / **error**: 配置管理与错误类型
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use langswitch::parsers::html_to_dom;
//! use langswitch::translation::{LanguageSwitcher, StaticDictionarySource, SwitcherConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dom = html_to_dom(b"<h1 lang=\"en\">Hello World</h1>", "utf-8")?;
//! let source = StaticDictionarySource::new()
//!     .with("es", [("Hello World", "Hola Mundo")].into_iter().collect());
//!
//! let switcher = LanguageSwitcher::new(
//!     dom.document.clone(),
//!     &SwitcherConfig::with_lang("es"),
//!     Box::new(source),
//!     None,
//! )?;
//! switcher.init().await?;
//! assert_eq!(switcher.get_lang(), "es");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod observer;
pub mod queue;
pub mod sanitizer;
pub mod source;
pub mod storage;
pub mod translator;

pub use config::{ConfigManager, SwitcherConfig};
pub use dictionary::Dictionary;
pub use engine::{LanguageSwitched, LanguageSwitcher};
pub use error::{TranslationError, TranslationResult};
pub use matcher::{apply_entry, MatchOptions, Rewrite};
pub use observer::{DocumentChangeWatcher, DomObserver};
pub use queue::JobQueue;
pub use sanitizer::{sanitize, strip_tags};
pub use source::{
    dictionary_source_for, DictionarySource, FsDictionarySource, HttpDictionarySource,
    StaticDictionarySource,
};
pub use storage::{LanguageStore, MemoryLanguageStore, RedbLanguageStore};
pub use translator::{translate, Fallback, Pass};
