//! 配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::constants;
use crate::parsers::html::Selector;
use crate::translation::error::{TranslationError, TranslationResult};

/// 语言切换配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SwitcherConfig {
    /// 文档原文所用的语言
    pub default_lang: String,
    /// 初始化时切换到的语言
    pub lang: String,
    /// 词典所在目录或 URL
    pub path: String,
    pub extension: String,
    /// 持久化当前语言
    pub persistent: bool,
    /// 匹配前折叠空白
    pub clean: bool,
    /// 额外翻译的属性
    pub attributes: Vec<String>,
    /// 变更监视根节点的选择器，`None` 表示不监视
    pub observe: Option<String>,
    pub storage_path: String,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            default_lang: constants::DEFAULT_LANG.to_string(),
            lang: constants::DEFAULT_LANG.to_string(),
            path: constants::DEFAULT_PATH.to_string(),
            extension: constants::DEFAULT_EXTENSION.to_string(),
            persistent: true,
            clean: true,
            attributes: Vec::new(),
            observe: Some(constants::DEFAULT_OBSERVE.to_string()),
            storage_path: constants::DEFAULT_STORAGE_PATH.to_string(),
        }
    }
}

fn is_lang_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl SwitcherConfig {
    /// 创建带指定语言的默认配置
    pub fn with_lang(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            ..Self::default()
        }
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if !is_lang_code(&self.default_lang) {
            return Err(TranslationError::ConfigError(format!(
                "无效的默认语言: {:?}",
                self.default_lang
            )));
        }

        if !is_lang_code(&self.lang) {
            return Err(TranslationError::ConfigError(format!(
                "无效的语言: {:?}",
                self.lang
            )));
        }

        if self.path.trim().is_empty() {
            return Err(TranslationError::ConfigError("词典路径不能为空".to_string()));
        }

        if self.extension.trim_start_matches('.').is_empty() {
            return Err(TranslationError::ConfigError("词典扩展名不能为空".to_string()));
        }

        if let Some(attr) = self
            .attributes
            .iter()
            .find(|attr| attr.is_empty() || attr.chars().any(char::is_whitespace))
        {
            return Err(TranslationError::ConfigError(format!(
                "无效的属性名: {:?}",
                attr
            )));
        }

        if let Some(observe) = &self.observe {
            if Selector::parse(observe).is_none() {
                return Err(TranslationError::ConfigError(format!(
                    "不支持的监视选择器: {:?}",
                    observe
                )));
            }
        }

        if self.persistent && self.storage_path.trim().is_empty() {
            return Err(TranslationError::ConfigError(
                "启用持久化时存储路径不能为空".to_string(),
            ));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    ///
    /// 只覆盖已设置的变量；无法解析的值记录警告后忽略。
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{switcher, EnvVar};

        fn apply<T>(value: crate::env::EnvResult<Option<T>>, target: &mut T) {
            match value {
                Ok(Some(value)) => *target = value,
                Ok(None) => {}
                Err(e) => tracing::warn!("忽略环境变量: {}", e),
            }
        }

        apply(switcher::DefaultLang::get_opt(), &mut self.default_lang);
        apply(switcher::Lang::get_opt(), &mut self.lang);
        apply(switcher::Path::get_opt(), &mut self.path);
        apply(switcher::Extension::get_opt(), &mut self.extension);
        apply(switcher::Persistent::get_opt(), &mut self.persistent);
        apply(switcher::Clean::get_opt(), &mut self.clean);
        apply(switcher::Attributes::get_opt(), &mut self.attributes);
        apply(switcher::StoragePath::get_opt(), &mut self.storage_path);

        // 空字符串表示关闭监视
        match switcher::Observe::get_opt() {
            Ok(Some(observe)) if observe.is_empty() => self.observe = None,
            Ok(Some(observe)) => self.observe = Some(observe),
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略环境变量: {}", e),
        }
    }

    /// 展开 `~` 后的存储路径
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.storage_path).as_ref())
    }
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: SwitcherConfig,
}

impl ConfigManager {
    /// 搜索配置文件并应用环境变量
    pub fn new() -> TranslationResult<Self> {
        let config = Self::load_config()?;
        Self::finish(config)
    }

    /// 使用指定配置文件
    pub fn from_file(path: impl AsRef<Path>) -> TranslationResult<Self> {
        Self::load_dotenv();
        let config = Self::load_from_file(path.as_ref())?;
        Self::finish(config)
    }

    fn finish(mut config: SwitcherConfig) -> TranslationResult<Self> {
        config.apply_env_overrides();
        config.validate()?;
        Ok(Self { config })
    }

    pub fn into_config(self) -> SwitcherConfig {
        self.config
    }

    fn load_config() -> TranslationResult<SwitcherConfig> {
        Self::load_dotenv();

        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            let path = Path::new(expanded_path.as_ref());
            if path.exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(SwitcherConfig::default())
    }

    /// 从指定文件加载配置，`.toml` 以外的扩展名按 JSON 解析
    pub fn load_from_file(path: &Path) -> TranslationResult<SwitcherConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslationError::ConfigError(format!("读取配置文件失败 {}: {}", path.display(), e))
        })?;

        if path.extension().map_or(false, |ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析TOML配置失败: {}", e)))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: impl AsRef<Path>) -> TranslationResult<()> {
        let content = toml::to_string_pretty(&SwitcherConfig::default())
            .map_err(|e| TranslationError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
