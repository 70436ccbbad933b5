//! 语言代码持久化
//!
//! 启用持久化时，每次切换完成后保存当前语言，下次初始化时恢复。

use std::cell::RefCell;
use std::path::Path;

use redb::{Database, TableDefinition, TableError};

use super::error::TranslationResult;

const LANGUAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("language");
const LANGUAGE_KEY: &str = "lang";

/// 语言代码存储
pub trait LanguageStore {
    fn load(&self) -> TranslationResult<Option<String>>;
    fn save(&self, lang: &str) -> TranslationResult<()>;
}

/// 进程内存储
#[derive(Debug, Default)]
pub struct MemoryLanguageStore {
    lang: RefCell<Option<String>>,
}

impl MemoryLanguageStore {
    pub fn new(lang: Option<&str>) -> Self {
        Self {
            lang: RefCell::new(lang.map(str::to_string)),
        }
    }
}

impl LanguageStore for MemoryLanguageStore {
    fn load(&self) -> TranslationResult<Option<String>> {
        Ok(self.lang.borrow().clone())
    }

    fn save(&self, lang: &str) -> TranslationResult<()> {
        *self.lang.borrow_mut() = Some(lang.to_string());
        Ok(())
    }
}

/// 基于 redb 的磁盘存储
pub struct RedbLanguageStore {
    db: Database,
}

impl RedbLanguageStore {
    /// 打开（必要时创建）数据库文件
    pub fn open(path: impl AsRef<Path>) -> TranslationResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path).map_err(redb::Error::from)?;
        Ok(Self { db })
    }
}

impl LanguageStore for RedbLanguageStore {
    fn load(&self) -> TranslationResult<Option<String>> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match txn.open_table(LANGUAGE_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(redb::Error::from(e).into()),
        };

        let lang = table
            .get(LANGUAGE_KEY)
            .map_err(redb::Error::from)?
            .map(|value| value.value().to_string())
            .filter(|lang| !lang.is_empty());

        Ok(lang)
    }

    fn save(&self, lang: &str) -> TranslationResult<()> {
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = txn.open_table(LANGUAGE_TABLE).map_err(redb::Error::from)?;
            table
                .insert(LANGUAGE_KEY, lang)
                .map_err(redb::Error::from)?;
        }
        txn.commit().map_err(redb::Error::from)?;

        tracing::debug!("已保存语言: {}", lang);
        Ok(())
    }
}

impl std::fmt::Debug for RedbLanguageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbLanguageStore").finish_non_exhaustive()
    }
}
