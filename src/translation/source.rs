//! 词典来源
//!
//! 每种语言的词典是 `<base>/<lang>.<extension>` 处的一个 JSON 对象。
//! 失败原因以人类可读的传输状态返回（如 `404 Not Found`、`parsererror: ...`）。

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use super::config::SwitcherConfig;
use super::dictionary::Dictionary;
use super::error::{TranslationError, TranslationResult};

/// 按语言代码获取词典
#[async_trait]
pub trait DictionarySource {
    async fn fetch(&self, lang: &str) -> TranslationResult<Dictionary>;
}

fn parse_dictionary(lang: &str, body: &str) -> TranslationResult<Dictionary> {
    Dictionary::from_json(body)
        .map_err(|e| TranslationError::dictionary_load(lang, format!("parsererror: {}", e)))
}

/// 从本地目录读取词典
#[derive(Debug, Clone)]
pub struct FsDictionarySource {
    base: PathBuf,
    extension: String,
}

impl FsDictionarySource {
    pub fn new(base: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            base: base.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn resource_path(&self, lang: &str) -> PathBuf {
        self.base.join(format!("{}.{}", lang, self.extension))
    }
}

#[async_trait]
impl DictionarySource for FsDictionarySource {
    async fn fetch(&self, lang: &str) -> TranslationResult<Dictionary> {
        let path = self.resource_path(lang);
        tracing::debug!("读取词典文件: {}", path.display());

        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| TranslationError::dictionary_load(lang, e))?;

        parse_dictionary(lang, &body)
    }
}

/// 通过 HTTP 获取词典
#[derive(Debug, Clone)]
pub struct HttpDictionarySource {
    client: reqwest::Client,
    base: Url,
    extension: String,
}

impl HttpDictionarySource {
    pub fn new(base: &str, extension: &str) -> TranslationResult<Self> {
        // 保证 base 以 `/` 结尾，否则 join 会替换掉最后一段路径
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&base).map_err(|e| {
            TranslationError::ConfigError(format!("无效的词典地址 {}: {}", base, e))
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base,
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    pub fn resource_url(&self, lang: &str) -> TranslationResult<Url> {
        self.base
            .join(&format!("{}.{}", lang, self.extension))
            .map_err(|e| TranslationError::dictionary_load(lang, e))
    }
}

#[async_trait]
impl DictionarySource for HttpDictionarySource {
    async fn fetch(&self, lang: &str) -> TranslationResult<Dictionary> {
        let url = self.resource_url(lang)?;
        tracing::debug!("请求词典: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranslationError::dictionary_load(lang, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::dictionary_load(lang, status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranslationError::dictionary_load(lang, e))?;

        parse_dictionary(lang, &body)
    }
}

/// 内存中的词典集合，适合嵌入式使用与测试
#[derive(Debug, Clone, Default)]
pub struct StaticDictionarySource {
    dictionaries: HashMap<String, Dictionary>,
}

impl StaticDictionarySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: &str, dictionary: Dictionary) -> Self {
        self.dictionaries.insert(lang.to_string(), dictionary);
        self
    }
}

#[async_trait]
impl DictionarySource for StaticDictionarySource {
    async fn fetch(&self, lang: &str) -> TranslationResult<Dictionary> {
        self.dictionaries
            .get(lang)
            .cloned()
            .ok_or_else(|| TranslationError::dictionary_load(lang, "404 Not Found"))
    }
}

/// 根据配置选择词典来源：`http(s)://` 走网络，其余按本地路径处理
pub fn dictionary_source_for(
    config: &SwitcherConfig,
) -> TranslationResult<Box<dyn DictionarySource>> {
    let path = config.path.trim();

    if path.starts_with("http://") || path.starts_with("https://") {
        Ok(Box::new(HttpDictionarySource::new(path, &config.extension)?))
    } else {
        let expanded = shellexpand::tilde(path);
        Ok(Box::new(FsDictionarySource::new(
            expanded.as_ref(),
            &config.extension,
        )))
    }
}
