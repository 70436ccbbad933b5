//! 语言切换配置管理模块
//!
//! 支持配置文件、`.env` 文件、环境变量和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, SwitcherConfig};

/// 配置常量
pub mod constants {
    pub const DEFAULT_LANG: &str = "en";
    pub const DEFAULT_PATH: &str = "languages/";
    pub const DEFAULT_EXTENSION: &str = "json";
    pub const DEFAULT_OBSERVE: &str = "document";
    pub const DEFAULT_STORAGE_PATH: &str = "~/.local/share/langswitch/lang.redb";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "langswitch.toml",
        ".langswitch.toml",
        "~/.config/langswitch/config.toml",
    ];

    // 按顺序尝试，只加载第一个存在的文件
    pub const ENV_FILES: &[&str] = &[".env.local", ".env"];
}
