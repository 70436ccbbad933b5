//! 语言切换引擎
//!
//! 引擎持有文档、当前生效的词典和任务队列，负责协调一次语言切换的全过程：
//!
//! 1. 异步获取目标语言的词典（唯一的挂起点）
//! 2. 把切换任务放入 FIFO 队列，任务同步执行，互不交错
//! 3. 任务内先用交叉词典把上一种语言直接译为目标语言，未覆盖的元素退回默认语言
//! 4. 替换词典后，再把所有默认语言元素译为目标语言
//! 5. 更新当前语言、持久化、广播 [`LanguageSwitched`]
//!
//! 切换回默认语言时不需要获取词典，直接反向套用当前词典。
//!
//! ## 线程模型
//! 文档句柄基于 `Rc`，引擎不是 `Send`，需要在单线程运行时（如 current-thread
//! tokio）上使用。并发发起的多次切换按词典获取完成的顺序生效，最后完成者为准。
//!
//! ## 使用示例
//! ```rust,no_run
//! use langswitch::parsers::html_to_dom;
//! use langswitch::translation::{LanguageSwitcher, SwitcherConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dom = html_to_dom(b"<p lang=\"en\">Hello World</p>", "utf-8")?;
//! let switcher = LanguageSwitcher::from_config(dom.document.clone(), &SwitcherConfig::default())?;
//! switcher.set_lang("es").await?;
//! # Ok(())
//! # }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use markup5ever_rcdom::Handle;
use tokio::sync::broadcast;

use crate::parsers::html::{self, watched_attributes, Selector};

use super::config::SwitcherConfig;
use super::dictionary::Dictionary;
use super::error::{TranslationError, TranslationResult};
use super::matcher::MatchOptions;
use super::observer::{DocumentChangeWatcher, DomObserver};
use super::queue::JobQueue;
use super::source::{dictionary_source_for, DictionarySource};
use super::storage::{LanguageStore, RedbLanguageStore};
use super::translator::{translate, Fallback, Pass};

const EVENT_CAPACITY: usize = 16;

/// 语言切换完成事件，在当前语言更新之后发出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSwitched {
    pub lang: String,
}

/// 可变的切换状态
#[derive(Debug)]
struct SwitcherState {
    current_lang: String,
    /// 默认语言短语 → 当前语言短语；当前语言为默认语言时为空
    dictionary: Dictionary,
}

struct SwitcherInner {
    document: Handle,
    default_lang: String,
    /// 初始化时切换到的语言
    initial_lang: String,
    persistent: bool,
    options: MatchOptions,
    state: RefCell<SwitcherState>,
    queue: JobQueue,
    source: Box<dyn DictionarySource>,
    store: Option<Box<dyn LanguageStore>>,
    watcher: Box<dyn DocumentChangeWatcher>,
    events: broadcast::Sender<LanguageSwitched>,
}

/// 任务执行期间断开监视器，结束（包括 panic）时重新连接
struct WatchPause<'a>(&'a dyn DocumentChangeWatcher);

impl<'a> WatchPause<'a> {
    fn new(watcher: &'a dyn DocumentChangeWatcher) -> Self {
        watcher.disconnect();
        Self(watcher)
    }
}

impl Drop for WatchPause<'_> {
    fn drop(&mut self) {
        self.0.connect();
    }
}

impl SwitcherInner {
    fn persist(&self, lang: &str) {
        if !self.persistent {
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(lang) {
                tracing::warn!("保存语言 {} 失败: {}", lang, e);
            }
        }
    }

    fn finish_switch(&self, lang: &str) {
        self.state.borrow_mut().current_lang = lang.to_string();
        self.persist(lang);
        // 没有订阅者时发送失败，可以忽略
        let _ = self.events.send(LanguageSwitched {
            lang: lang.to_string(),
        });
        tracing::info!("语言已切换为 {}", lang);
    }

    /// 反向套用当前词典，回到默认语言
    fn switch_to_default(&self) {
        tracing::info!(state = "SwitchingToDefault", "切换回默认语言 {}", self.default_lang);

        {
            let mut state = self.state.borrow_mut();
            let from = state.current_lang.clone();
            let pass = Pass::new(&from, &self.default_lang, &state.dictionary)
                .reversed()
                .with_fallback(Fallback {
                    current_lang: &from,
                    default_lang: &self.default_lang,
                    dictionary: &state.dictionary,
                });
            translate(&self.document, &pass, &self.options);

            state.dictionary = Dictionary::new();
        }

        self.finish_switch(&self.default_lang);
    }

    /// 用新获取的词典切换到 `lang`
    fn apply_switch(&self, lang: &str, fetched: Dictionary) {
        tracing::info!(state = "ApplyingSwitch", "应用语言 {}", lang);

        {
            let next = fetched.sanitized(self.options.clean);
            let mut state = self.state.borrow_mut();
            let from = state.current_lang.clone();

            let cross = state.dictionary.cross(&next);
            let pass = Pass::new(&from, lang, &cross).with_fallback(Fallback {
                current_lang: &from,
                default_lang: &self.default_lang,
                dictionary: &state.dictionary,
            });
            translate(&self.document, &pass, &self.options);

            state.dictionary = next;
            translate(
                &self.document,
                &Pass::new(&self.default_lang, lang, &state.dictionary),
                &self.options,
            );
        }

        self.finish_switch(lang);
    }

    /// 把 `root` 及其后代中的默认语言元素译为当前语言
    fn sync_subtree(&self, root: &Handle) -> usize {
        let state = self.state.borrow();
        if state.current_lang == self.default_lang {
            return 0;
        }

        let pass = Pass::new(&self.default_lang, &state.current_lang, &state.dictionary);
        translate(root, &pass.root_only(), &self.options) + translate(root, &pass, &self.options)
    }
}

/// 语言切换引擎
///
/// 克隆得到的是同一个引擎的另一个句柄。
#[derive(Clone)]
pub struct LanguageSwitcher {
    inner: Rc<SwitcherInner>,
}

impl LanguageSwitcher {
    /// 使用给定的词典来源和语言存储创建引擎
    ///
    /// 引擎以默认语言启动，调用 [`init`](Self::init) 后切换到配置或已保存的语言。
    pub fn new(
        document: Handle,
        config: &SwitcherConfig,
        source: Box<dyn DictionarySource>,
        store: Option<Box<dyn LanguageStore>>,
    ) -> TranslationResult<Self> {
        config.validate()?;

        let watcher = DomObserver::attach(&document, config.observe.as_deref());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let inner = SwitcherInner {
            default_lang: config.default_lang.clone(),
            initial_lang: config.lang.clone(),
            persistent: config.persistent,
            options: MatchOptions {
                clean: config.clean,
                attributes: watched_attributes(&config.attributes),
            },
            state: RefCell::new(SwitcherState {
                current_lang: config.default_lang.clone(),
                dictionary: Dictionary::new(),
            }),
            queue: JobQueue::new(),
            source,
            store,
            watcher: Box::new(watcher),
            events,
            document,
        };

        Ok(Self {
            inner: Rc::new(inner),
        })
    }

    /// 按配置创建词典来源；启用持久化时打开 redb 存储
    ///
    /// 存储打开失败不影响翻译，只是不再保存语言。
    pub fn from_config(document: Handle, config: &SwitcherConfig) -> TranslationResult<Self> {
        let source = dictionary_source_for(config)?;

        let store: Option<Box<dyn LanguageStore>> = if config.persistent {
            let path = config.storage_path();
            match RedbLanguageStore::open(&path) {
                Ok(store) => Some(Box::new(store)),
                Err(e) => {
                    tracing::warn!("无法打开语言存储 {}: {}", path.display(), e);
                    None
                }
            }
        } else {
            None
        };

        Self::new(document, config, source, store)
    }

    /// 切换到已保存的语言，没有时切换到配置的语言
    pub async fn init(&self) -> TranslationResult<()> {
        let saved = match (&self.inner.store, self.inner.persistent) {
            (Some(store), true) => store.load().unwrap_or_else(|e| {
                tracing::warn!("读取已保存的语言失败: {}", e);
                None
            }),
            _ => None,
        };

        let lang = saved.unwrap_or_else(|| self.inner.initial_lang.clone());
        self.set_lang(&lang).await
    }

    /// 切换到 `lang`
    ///
    /// 与当前语言相同时什么都不做。词典获取失败时返回
    /// [`TranslationError::DictionaryLoad`]，文档和引擎状态保持不变。
    pub async fn set_lang(&self, lang: &str) -> TranslationResult<()> {
        if lang == self.get_lang() {
            tracing::debug!("已经是 {}，忽略切换", lang);
            return Ok(());
        }

        if lang == self.inner.default_lang {
            self.enqueue(|inner| inner.switch_to_default());
            return Ok(());
        }

        tracing::info!(state = "FetchingDictionary", "获取 {} 词典", lang);
        let fetched = self.inner.source.fetch(lang).await.map_err(|e| match e {
            e @ TranslationError::DictionaryLoad { .. } => e,
            other => TranslationError::dictionary_load(lang, other),
        })?;

        let lang = lang.to_string();
        self.enqueue(move |inner| inner.apply_switch(&lang, fetched));
        Ok(())
    }

    pub fn get_lang(&self) -> String {
        self.inner.state.borrow().current_lang.clone()
    }

    pub fn default_lang(&self) -> &str {
        &self.inner.default_lang
    }

    /// 查找单条短语的当前语言译文，找不到时原样返回
    pub fn t(&self, phrase: &str) -> String {
        self.inner
            .state
            .borrow()
            .dictionary
            .get(phrase)
            .unwrap_or(phrase)
            .to_string()
    }

    /// 以译文替换元素内容并上报变更
    pub fn set_content(&self, element: &Handle, content: &str) {
        html::set_inner_html(element, &self.t(content));
        self.notify_mutation(element);
    }

    /// 以译文替换元素的纯文本内容并上报变更
    pub fn set_text(&self, element: &Handle, text: &str) {
        html::set_text(element, &self.t(text));
        self.notify_mutation(element);
    }

    /// 在元素末尾追加 HTML 片段并上报变更
    pub fn append_html(&self, parent: &Handle, markup: &str) -> Vec<Handle> {
        let nodes = html::append_html(parent, markup);
        self.notify_mutation(parent);
        nodes
    }

    /// 上报一次文档变更；位于监视范围内时安排重新同步，返回是否安排
    pub fn notify_mutation(&self, target: &Handle) -> bool {
        if !self.inner.watcher.observes(target) {
            return false;
        }
        self.resync(target);
        true
    }

    /// 安排一次对 `subtree` 的重新同步
    pub fn resync(&self, subtree: &Handle) {
        let subtree = subtree.clone();
        self.enqueue(move |inner| {
            inner.sync_subtree(&subtree);
        });
    }

    /// 立即翻译选择器匹配的所有子树，返回匹配到的根节点数
    pub fn translate_subtree(&self, selector: &str) -> TranslationResult<usize> {
        let parsed = Selector::parse(selector).ok_or_else(|| {
            TranslationError::InvalidInput(format!("不支持的选择器: {:?}", selector))
        })?;

        let roots = parsed.select(&self.inner.document);
        for root in &roots {
            self.inner.sync_subtree(root);
        }
        Ok(roots.len())
    }

    /// 订阅语言切换事件
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageSwitched> {
        self.inner.events.subscribe()
    }

    pub fn document(&self) -> &Handle {
        &self.inner.document
    }

    pub fn pending_jobs(&self) -> usize {
        self.inner.queue.len()
    }

    fn enqueue(&self, job: impl FnOnce(&SwitcherInner) + 'static) {
        let inner = Rc::clone(&self.inner);
        self.inner.queue.enqueue(move || {
            let _pause = WatchPause::new(inner.watcher.as_ref());
            job(&inner);
        });
    }
}

impl std::fmt::Debug for LanguageSwitcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("LanguageSwitcher")
            .field("default_lang", &self.inner.default_lang)
            .field("current_lang", &state.current_lang)
            .field("entries", &state.dictionary.len())
            .field("queue", &self.inner.queue)
            .finish_non_exhaustive()
    }
}
