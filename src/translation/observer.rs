//! 文档变更监视
//!
//! rcdom 没有变更通知，文档修改通过 [`LanguageSwitcher::notify_mutation`] 上报，
//! 由监视器决定是否需要为该子树安排一次重新同步。引擎自己的任务执行期间
//! 监视器处于断开状态，不会对引擎自身的写入做出反应。
//!
//! [`LanguageSwitcher::notify_mutation`]: super::engine::LanguageSwitcher::notify_mutation

use std::cell::Cell;

use markup5ever_rcdom::Handle;

use crate::parsers::html::{is_within, Selector};

/// 文档变更监视器
pub trait DocumentChangeWatcher {
    /// 该变更是否需要重新同步
    fn observes(&self, target: &Handle) -> bool;
    fn connect(&self);
    fn disconnect(&self);
}

/// 监视某个根节点及其后代的变更
#[derive(Debug)]
pub struct DomObserver {
    root: Option<Handle>,
    connected: Cell<bool>,
}

impl DomObserver {
    /// 按选择器解析监视根节点；找不到时记录日志并保持未挂载
    pub fn attach(document: &Handle, observe: Option<&str>) -> Self {
        let root = observe.and_then(|selector| {
            let root = Selector::parse(selector)
                .and_then(|parsed| parsed.select(document).into_iter().next());
            if root.is_none() {
                tracing::warn!("未找到监视目标 {:?}，文档变更监视已禁用", selector);
            }
            root
        });

        Self {
            connected: Cell::new(root.is_some()),
            root,
        }
    }

    /// 不监视任何内容
    pub fn detached() -> Self {
        Self {
            root: None,
            connected: Cell::new(false),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.root.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }
}

impl DocumentChangeWatcher for DomObserver {
    fn observes(&self, target: &Handle) -> bool {
        match &self.root {
            Some(root) => self.connected.get() && is_within(root, target),
            None => false,
        }
    }

    fn connect(&self) {
        if self.root.is_some() {
            self.connected.set(true);
        }
    }

    fn disconnect(&self) {
        self.connected.set(false);
    }
}
