//! 节点匹配与重写
//!
//! 对单个元素检查三类内容：innerHTML（规范化后比较）、受监视的属性、
//! 按钮类控件的 value（后两者都是原样比较）。命中后先更新 `lang`，再写入译文。

use markup5ever_rcdom::Handle;

use crate::parsers::html::{
    get_node_attr, inner_html, is_value_control, set_inner_html, set_node_attr, LANG_ATTR,
};

use super::sanitizer::{sanitize, strip_tags};

/// 匹配选项
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// 是否启用空白折叠
    pub clean: bool,
    /// 参与翻译的属性（已排序去重）
    pub attributes: Vec<String>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            clean: true,
            attributes: crate::parsers::html::watched_attributes(&[]),
        }
    }
}

/// 一次匹配的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub content: bool,
    pub attributes: usize,
    pub value: bool,
}

impl Rewrite {
    pub fn any(&self) -> bool {
        self.content || self.attributes > 0 || self.value
    }
}

/// 预处理过的词条，`key` 为规范化后的源短语
#[derive(Debug, Clone)]
pub struct PreparedEntry<'a> {
    pub key: String,
    pub source: &'a str,
    pub target: &'a str,
}

impl<'a> PreparedEntry<'a> {
    pub fn new(source: &'a str, target: &'a str, clean: bool) -> Self {
        Self {
            key: sanitize(source, clean),
            source,
            target,
        }
    }
}

/// 单个元素的重写器，缓存元素内容的匹配键直到内容被改写
pub struct ElementRewriter<'a> {
    element: &'a Handle,
    options: &'a MatchOptions,
    content_key: Option<String>,
}

impl<'a> ElementRewriter<'a> {
    pub fn new(element: &'a Handle, options: &'a MatchOptions) -> Self {
        Self {
            element,
            options,
            content_key: None,
        }
    }

    fn content_key(&mut self) -> &str {
        let element = self.element;
        let clean = self.options.clean;
        self.content_key
            .get_or_insert_with(|| sanitize(&inner_html(element), clean))
            .as_str()
    }

    fn mark(&self, target_lang: &str) {
        set_node_attr(self.element, LANG_ATTR, Some(target_lang));
    }

    /// 用一个词条尝试重写元素
    pub fn apply(&mut self, entry: &PreparedEntry<'_>, target_lang: &str) -> Rewrite {
        let mut rewrite = Rewrite::default();

        if self.content_key() == entry.key {
            self.mark(target_lang);
            set_inner_html(self.element, entry.target);
            self.content_key = None;
            rewrite.content = true;
        }

        for attr in &self.options.attributes {
            if get_node_attr(self.element, attr).as_deref() == Some(entry.source) {
                self.mark(target_lang);
                set_node_attr(self.element, attr, Some(&strip_tags(entry.target)));
                rewrite.attributes += 1;
            }
        }

        if is_value_control(self.element)
            && get_node_attr(self.element, "value").as_deref() == Some(entry.source)
        {
            self.mark(target_lang);
            set_node_attr(self.element, "value", Some(&strip_tags(entry.target)));
            rewrite.value = true;
        }

        rewrite
    }

    /// 元素当前的语言标记
    pub fn lang(&self) -> Option<String> {
        get_node_attr(self.element, LANG_ATTR)
    }
}

/// 用单个词条匹配并重写元素
pub fn apply_entry(
    element: &Handle,
    source: &str,
    target: &str,
    target_lang: &str,
    options: &MatchOptions,
) -> Rewrite {
    let entry = PreparedEntry::new(source, target, options.clean);
    ElementRewriter::new(element, options).apply(&entry, target_lang)
}
