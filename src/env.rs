//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。语言切换相关变量没有内置默认值：
//! 未设置时不覆盖配置文件中的值。

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 变量已设置时返回解析结果，未设置时返回 `None`
    fn get_opt() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "LANGSWITCH_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 约定：任何非空值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 语言切换相关环境变量
pub mod switcher {
    use super::*;

    /// 默认语言
    pub struct DefaultLang;
    impl EnvVar<String> for DefaultLang {
        const NAME: &'static str = "LANGSWITCH_DEFAULT_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Language the document is written in";

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang_code(value, Self::NAME)
        }
    }

    /// 初始化时切换到的语言
    pub struct Lang;
    impl EnvVar<String> for Lang {
        const NAME: &'static str = "LANGSWITCH_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Language to switch to on startup";

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang_code(value, Self::NAME)
        }
    }

    /// 词典目录或 URL
    pub struct Path;
    impl EnvVar<String> for Path {
        const NAME: &'static str = "LANGSWITCH_PATH";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Directory or http(s) URL holding <lang>.<extension> dictionaries";

        fn parse(value: &str) -> EnvResult<String> {
            let path = value.trim();
            if path.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Dictionary path cannot be empty".to_string(),
                });
            }
            Ok(path.to_string())
        }
    }

    /// 词典文件扩展名
    pub struct Extension;
    impl EnvVar<String> for Extension {
        const NAME: &'static str = "LANGSWITCH_EXTENSION";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Dictionary file extension";

        fn parse(value: &str) -> EnvResult<String> {
            let ext = value.trim().trim_start_matches('.');
            if ext.is_empty() || ext.contains('/') {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid extension '{}'", value),
                });
            }
            Ok(ext.to_string())
        }
    }

    /// 是否持久化当前语言
    pub struct Persistent;
    impl EnvVar<bool> for Persistent {
        const NAME: &'static str = "LANGSWITCH_PERSISTENT";
        const DEFAULT: Option<bool> = None;
        const DESCRIPTION: &'static str = "Remember the selected language between runs";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 匹配前是否折叠空白
    pub struct Clean;
    impl EnvVar<bool> for Clean {
        const NAME: &'static str = "LANGSWITCH_CLEAN";
        const DEFAULT: Option<bool> = None;
        const DESCRIPTION: &'static str = "Collapse whitespace and newlines before matching phrases";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 额外监视的属性
    pub struct Attributes;
    impl EnvVar<Vec<String>> for Attributes {
        const NAME: &'static str = "LANGSWITCH_ATTRIBUTES";
        const DEFAULT: Option<Vec<String>> = None;
        const DESCRIPTION: &'static str = "Extra attributes to translate (comma-separated)";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect())
        }
    }

    /// 变更监视根节点
    pub struct Observe;
    impl EnvVar<String> for Observe {
        const NAME: &'static str = "LANGSWITCH_OBSERVE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Selector of the subtree watched for changes";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 语言存储文件
    pub struct StoragePath;
    impl EnvVar<String> for StoragePath {
        const NAME: &'static str = "LANGSWITCH_STORAGE_PATH";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Database file where the selected language is persisted";

        fn parse(value: &str) -> EnvResult<String> {
            let path = value.trim();
            if path.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Storage path cannot be empty".to_string(),
                });
            }
            Ok(path.to_string())
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_lang_code(value: &str, var_name: &str) -> EnvResult<String> {
    let lang = value.trim();
    let valid = !lang.is_empty()
        && lang
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(lang.to_string())
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid language code '{}'", value),
        })
    }
}

fn doc_line<T: fmt::Debug, V: EnvVar<T>>() -> String {
    format!("- `{}`: {} (default: {:?})\n", V::NAME, V::DESCRIPTION, V::DEFAULT)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&doc_line::<String, core::LogLevel>());
    docs.push_str(&doc_line::<bool, core::NoColor>());

    docs.push_str("\n## Language Switcher Configuration\n\n");
    docs.push_str(&doc_line::<String, switcher::DefaultLang>());
    docs.push_str(&doc_line::<String, switcher::Lang>());
    docs.push_str(&doc_line::<String, switcher::Path>());
    docs.push_str(&doc_line::<String, switcher::Extension>());
    docs.push_str(&doc_line::<bool, switcher::Persistent>());
    docs.push_str(&doc_line::<bool, switcher::Clean>());
    docs.push_str(&doc_line::<Vec<String>, switcher::Attributes>());
    docs.push_str(&doc_line::<String, switcher::Observe>());
    docs.push_str(&doc_line::<String, switcher::StoragePath>());

    docs
}
