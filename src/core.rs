use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use markup5ever_rcdom::RcDom;

use crate::parsers::html::{get_charset, get_title, html_to_dom, serialize_document};
use crate::translation::{LanguageSwitcher, SwitcherConfig, TranslationError};

/// Represents errors that can occur while switching a document's language
#[derive(Debug)]
pub struct LangSwitchError {
    details: String,
}

impl LangSwitchError {
    /// Creates a new LangSwitchError with the given message
    pub fn new(msg: &str) -> LangSwitchError {
        LangSwitchError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for LangSwitchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for LangSwitchError {}

impl From<TranslationError> for LangSwitchError {
    fn from(error: TranslationError) -> Self {
        LangSwitchError::new(&error.to_string())
    }
}

/// Options controlling how a document is processed
#[derive(Debug, Default, Clone)]
pub struct DocumentOptions {
    /// Language to switch to after the switcher has been initialised
    pub lang: Option<String>,
    /// Charset used to decode the input when the document does not declare one
    pub input_encoding: Option<String>,
    /// Charset of the produced document; defaults to the input's
    pub output_encoding: Option<String>,
    pub config: SwitcherConfig,
}

/// Result of processing a single document
#[derive(Debug)]
pub struct ProcessedDocument {
    pub data: Vec<u8>,
    pub title: Option<String>,
    pub lang: String,
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Switches the language of an HTML document held in memory
pub async fn switch_document_language_from_data(
    input_data: &[u8],
    options: &DocumentOptions,
) -> Result<ProcessedDocument, LangSwitchError> {
    DocumentProcessor::new(options).process_document(input_data).await
}

/// Switches the language of the HTML file at `target`
pub async fn switch_document_language(
    target: &str,
    options: &DocumentOptions,
) -> Result<ProcessedDocument, LangSwitchError> {
    let path = Path::new(target);
    if !path.exists() {
        return Err(LangSwitchError::new(&format!("File not found: {target}")));
    }

    let input_data =
        fs::read(path).map_err(|e| LangSwitchError::new(&format!("Failed to read file: {e}")))?;

    switch_document_language_from_data(&input_data, options).await
}

/// Substitutes `%title%` and `%lang%` in an output path
pub fn format_output_path(path: &str, document_title: Option<&str>, lang: &str) -> String {
    let title = document_title.unwrap_or("");

    path.replace(
        "%title%",
        title
            .replace(['/', '\\'], "_")
            .replace('<', "[")
            .replace('>', "]")
            .replace(':', " - ")
            .replace('\"', "")
            .replace('|', "-")
            .replace('?', "")
            .trim_start_matches('.'),
    )
    .replace("%lang%", lang)
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// 文档处理器
pub struct DocumentProcessor<'a> {
    options: &'a DocumentOptions,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(options: &'a DocumentOptions) -> Self {
        Self { options }
    }

    /// 处理文档数据并返回最终结果
    pub async fn process_document(
        &self,
        input_data: &[u8],
    ) -> Result<ProcessedDocument, LangSwitchError> {
        // 1. 验证编码选项
        EncodingValidator::new().validate_options(self.options)?;

        // 2. 解析文档，确定编码
        let (dom, document_encoding) = EncodingProcessor::new()
            .process_encoding(input_data, self.options.input_encoding.clone())?;

        // 3. 切换语言
        let lang = self.process_translation(&dom).await?;

        // 4. 序列化
        let title = get_title(&dom.document);
        let output_encoding = self
            .options
            .output_encoding
            .clone()
            .unwrap_or(document_encoding);
        let data = serialize_document(&dom.document, &output_encoding)
            .map_err(|e| LangSwitchError::new(&format!("Failed to serialize document: {e}")))?;

        Ok(ProcessedDocument { data, title, lang })
    }

    async fn process_translation(&self, dom: &RcDom) -> Result<String, LangSwitchError> {
        let switcher = LanguageSwitcher::from_config(dom.document.clone(), &self.options.config)?;
        switcher.init().await?;

        if let Some(lang) = &self.options.lang {
            switcher.set_lang(lang).await?;
        }

        Ok(switcher.get_lang())
    }
}

/// 编码验证器
pub struct EncodingValidator;

impl EncodingValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_options(&self, options: &DocumentOptions) -> Result<(), LangSwitchError> {
        for charset in [&options.input_encoding, &options.output_encoding]
            .into_iter()
            .flatten()
        {
            if Encoding::for_label_no_replacement(charset.as_bytes()).is_none() {
                return Err(LangSwitchError::new(&format!("Unknown encoding: {charset}")));
            }
        }
        Ok(())
    }
}

impl Default for EncodingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 编码处理器
pub struct EncodingProcessor;

impl EncodingProcessor {
    pub fn new() -> Self {
        Self
    }

    /// 按给定编码解析；文档自身声明了有效字符集时按该字符集重新解析
    pub fn process_encoding(
        &self,
        input_data: &[u8],
        input_encoding: Option<String>,
    ) -> Result<(RcDom, String), LangSwitchError> {
        let mut document_encoding = input_encoding.unwrap_or_else(|| "utf-8".to_string());
        let parse = |encoding: &str| {
            html_to_dom(input_data, encoding)
                .map_err(|e| LangSwitchError::new(&format!("Failed to parse document: {e}")))
        };

        let mut dom = parse(&document_encoding)?;

        if let Some(html_charset) = get_charset(&dom.document) {
            if let Some(charset) = Encoding::for_label_no_replacement(html_charset.as_bytes()) {
                if !charset.name().eq_ignore_ascii_case(&document_encoding) {
                    document_encoding = charset.name().to_string();
                    dom = parse(&document_encoding)?;
                }
            }
        }

        Ok((dom, document_encoding))
    }
}

impl Default for EncodingProcessor {
    fn default() -> Self {
        Self::new()
    }
}
