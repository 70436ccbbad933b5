//! 任务队列
//!
//! 所有引擎工作（语言切换、文档变更后的重新同步）都以无参任务的形式进入同一个
//! FIFO 队列，逐个执行，互不交错。任务执行期间再次入队只会追加，由正在进行的
//! 排空循环继续处理。

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// 延迟执行的任务
pub type Job = Box<dyn FnOnce()>;

/// 单线程 FIFO 任务队列
#[derive(Default)]
pub struct JobQueue {
    jobs: RefCell<VecDeque<Job>>,
    executing: Cell<bool>,
}

/// 排空结束（包括任务 panic）时复位执行标志
struct ExecutingGuard<'a>(&'a Cell<bool>);

impl Drop for ExecutingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加任务并尝试排空队列
    pub fn enqueue(&self, job: impl FnOnce() + 'static) {
        self.jobs.borrow_mut().push_back(Box::new(job));
        self.drain();
    }

    /// 依次执行队列中的任务，直到队列为空
    ///
    /// 已在排空时直接返回。
    pub fn drain(&self) {
        if self.executing.get() {
            return;
        }
        self.executing.set(true);
        let _guard = ExecutingGuard(&self.executing);

        loop {
            let next = self.jobs.borrow_mut().pop_front();
            match next {
                Some(job) => job(),
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.borrow().is_empty()
    }

    pub fn is_executing(&self) -> bool {
        self.executing.get()
    }
}

impl std::fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobQueue")
            .field("pending", &self.len())
            .field("executing", &self.is_executing())
            .finish()
    }
}
