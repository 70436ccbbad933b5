//! 翻译词典
//!
//! 词典保持加载时的条目顺序：匹配按顺序逐条进行，同一元素可能被多条命中，
//! 顺序决定最终结果。

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::error::{TranslationError, TranslationResult};
use super::sanitizer::sanitize;

/// 有序、键唯一的短语映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入条目；键已存在时原位覆盖值
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 从 JSON 对象解析，值必须全部为字符串
    pub fn from_json(json: &str) -> TranslationResult<Self> {
        let map: Map<String, Value> = serde_json::from_str(json)?;
        let mut dictionary = Dictionary::new();

        for (key, value) in map {
            match value {
                Value::String(s) => dictionary.insert(key, s),
                other => {
                    return Err(TranslationError::ParseError(format!(
                        "词条 {:?} 的值不是字符串: {}",
                        key, other
                    )))
                }
            }
        }

        Ok(dictionary)
    }

    /// 规范化所有键，值保持原样
    pub fn sanitized(&self, clean: bool) -> Dictionary {
        let mut dictionary = Dictionary::new();
        for (key, value) in self.iter() {
            dictionary.insert(sanitize(key, clean), value);
        }
        dictionary
    }

    /// 构建交叉词典：旧语言短语 → 新语言短语
    ///
    /// 只包含两个词典共有的默认语言键。
    pub fn cross(&self, next: &Dictionary) -> Dictionary {
        let mut cross = Dictionary::new();
        for (key, old_value) in self.iter() {
            if let Some(new_value) = next.get(key) {
                cross.insert(old_value, new_value);
            }
        }
        cross
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        for (key, value) in iter {
            dictionary.insert(key, value);
        }
        dictionary
    }
}
