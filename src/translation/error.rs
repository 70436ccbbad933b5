//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 词典加载失败，切换请求被放弃，引擎状态保持不变
    #[error("Error loading language: {lang} ({reason})")]
    DictionaryLoad { lang: String, reason: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 语言持久化存储错误
    #[error("存储错误: {0}")]
    StorageError(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 创建词典加载错误
    pub fn dictionary_load(lang: &str, reason: impl fmt::Display) -> Self {
        TranslationError::DictionaryLoad {
            lang: lang.to_string(),
            reason: reason.to_string(),
        }
    }

    /// 检查错误是否可重试（由调用方再次发起）
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::DictionaryLoad { .. } => true,
            TranslationError::IoError(_) => true,
            TranslationError::ConfigError(_) => false,
            TranslationError::StorageError(_) => false,
            TranslationError::ParseError(_) => false,
            TranslationError::InvalidInput(_) => false,
            TranslationError::InternalError(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::DictionaryLoad { .. } => ErrorSeverity::Error,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::StorageError(_) => ErrorSeverity::Warning,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::IoError(_) => ErrorSeverity::Error,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::DictionaryLoad { .. } => ErrorCategory::Network,
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::StorageError(_) => ErrorCategory::Storage,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::IoError(_) => ErrorCategory::Io,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        let append = |msg: &mut String| *msg = format!("{} (上下文: {})", msg, context);

        match &mut self {
            TranslationError::DictionaryLoad { reason, .. } => append(reason),
            TranslationError::ConfigError(msg)
            | TranslationError::StorageError(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::IoError(msg)
            | TranslationError::InternalError(msg) => append(msg),
        }

        self
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Input,
    Io,
    Parsing,
    Internal,
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ParseError(format!("TOML解析错误: {}", error))
    }
}

impl From<redb::Error> for TranslationError {
    fn from(error: redb::Error) -> Self {
        TranslationError::StorageError(error.to_string())
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        match error.url() {
            Some(url) => TranslationError::IoError(format!("请求 {} 失败: {}", url, error)),
            None => TranslationError::IoError(error.to_string()),
        }
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &TranslationError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("{}", error),
            ErrorSeverity::Warning => tracing::warn!("{}", error),
            ErrorSeverity::Error => tracing::error!("{}", error),
            ErrorSeverity::Critical => tracing::error!("严重错误: {}", error),
        }
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建存储错误
    pub fn storage_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::StorageError(msg.to_string())
    }

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InvalidInput(msg.to_string())
    }
}
