//! TaskPool - バックグラウンドタスク実行サービス
//!
//! # フロー
//! 1. `submit*()` で ID を払い出し、レジストリに Pending で登録してキューへ積む
//!    （ここで呼び出し側に ID を返す。実行の完了は待たない）
//! 2. 空いたワーカーがキューから取り出し、Running に遷移して `started` を通知
//! 3. unit of work を実行（Err も panic も捕まえる）
//! 4. レジストリから削除し、`succeeded` / `failed` を通知
//!
//! # 通知
//! observer は通知の瞬間に読み出す。実行中に差し替えられた場合、
//! 終端イベントは新しい observer に届く。observer 未登録のイベントは捨てられる。

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::RwLock;
use tracing::{debug, error, info, trace, warn};

use super::builder::TaskPoolBuilder;
use super::config::PoolConfig;
use super::registry::TaskRegistry;
use super::status::PoolCounts;
use super::worker::{QueuedTask, WorkerGroup};
use crate::domain::{
    PoolError, TaskError, TaskEvent, TaskId, TaskRecord, TaskSnapshot, WorkerId,
    default_task_name,
};
use crate::ports::{Clock, IdGenerator, TaskObserver};
use crate::typed::{FnWork, Job, JobWork, TaskOutput, UnitOfWork};

/// State shared between the pool handle and its workers.
pub(crate) struct PoolShared {
    registry: TaskRegistry,
    observer: RwLock<Option<Arc<dyn TaskObserver>>>,
    clock: Arc<dyn Clock>,
}

impl PoolShared {
    pub(crate) fn new(clock: Arc<dyn Clock>, observer: Option<Arc<dyn TaskObserver>>) -> Self {
        Self {
            registry: TaskRegistry::new(),
            observer: RwLock::new(observer),
            clock,
        }
    }

    /// Run one task on the calling worker thread and report its lifecycle.
    pub(crate) fn execute(&self, worker_id: WorkerId, task: QueuedTask) {
        let QueuedTask { id, name, work } = task;

        let started_at = self.clock.now();
        if !self.registry.mark_running(id, started_at) {
            warn!(task_id = %id, "task was not pending when picked up");
        }
        debug!(task_id = %id, %worker_id, name = %name, "task running");
        self.publish(TaskEvent::started(id, &name, started_at));

        let outcome = catch_unwind(AssertUnwindSafe(|| work.run()))
            .unwrap_or_else(|payload| Err(TaskError::from_panic(payload)));

        // 終端イベントより先にレジストリから外す
        self.registry.remove(id);

        let finished_at = self.clock.now();
        let event = match outcome {
            Ok(()) => TaskEvent::succeeded(id, &name, finished_at),
            Err(err) => TaskEvent::failed(id, &name, err.message(), finished_at),
        };
        self.publish(event);
    }

    fn publish(&self, event: TaskEvent) {
        debug!(
            task_id = %event.task_id,
            status = %event.status,
            message = %event.message,
            "task event"
        );

        // ロックを握ったまま observer を呼ばない（observer から set_observer できるように）
        let observer = self.observer.read().clone();
        let Some(observer) = observer else {
            trace!(task_id = %event.task_id, "no observer registered; event dropped");
            return;
        };

        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| observer.on_event(&event))) {
            let err = TaskError::from_panic(payload);
            warn!(task_id = %event.task_id, status = %event.status, "observer {err}");
        }
    }

    fn set_observer(&self, observer: Arc<dyn TaskObserver>) {
        *self.observer.write() = Some(observer);
    }

    fn has_observer(&self) -> bool {
        self.observer.read().is_some()
    }
}

/// Bounded pool of worker threads with a single lifecycle observer.
///
/// # 使用例
/// ```ignore
/// let pool = TaskPool::new(PoolConfig::default())?;
/// pool.set_observer(|e: &TaskEvent| println!("{} {} {}", e.task_id, e.label(), e.message));
///
/// let id = pool.submit_named("Compress images", move || compress(&dir));
/// ```
///
/// Dropping the pool (or calling [`TaskPool::shutdown`]) stops intake, lets
/// queued tasks finish, and joins the workers.
pub struct TaskPool {
    shared: Arc<PoolShared>,
    ids: Arc<dyn IdGenerator>,
    sender: Option<Sender<QueuedTask>>,
    workers: WorkerGroup,
    config: PoolConfig,
}

impl TaskPool {
    pub fn builder() -> TaskPoolBuilder {
        TaskPoolBuilder::new()
    }

    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        Self::builder().config(config).build()
    }

    pub(crate) fn from_parts(
        config: PoolConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        observer: Option<Arc<dyn TaskObserver>>,
    ) -> Result<Self, PoolError> {
        config.validate()?;

        let shared = Arc::new(PoolShared::new(clock, observer));
        let (sender, queue) = crossbeam_channel::unbounded();
        let workers = WorkerGroup::spawn(&config, queue, Arc::clone(&shared))?;

        info!(
            max_workers = config.max_workers,
            prefix = %config.thread_name_prefix,
            "task pool started"
        );

        Ok(Self {
            shared,
            ids,
            sender: Some(sender),
            workers,
            config,
        })
    }

    /// Replace the observer. Last writer wins; there is no fan-out.
    pub fn set_observer<O: TaskObserver + 'static>(&self, observer: O) {
        self.shared.set_observer(Arc::new(observer));
    }

    /// Same as [`TaskPool::set_observer`] for an observer that is already shared.
    pub fn set_shared_observer(&self, observer: Arc<dyn TaskObserver>) {
        self.shared.set_observer(observer);
    }

    pub fn has_observer(&self) -> bool {
        self.shared.has_observer()
    }

    /// Submit an unnamed closure. It is reported as `"Task {id}"`.
    ///
    /// Returns immediately. The closure's `Err` (or panic) is reported as a
    /// `failed` event and never reaches the caller.
    pub fn submit<F, R>(&self, f: F) -> TaskId
    where
        F: FnOnce() -> R + Send + 'static,
        R: TaskOutput,
    {
        self.enqueue(None, Box::new(FnWork::new(f)))
    }

    pub fn submit_named<F, R>(&self, name: impl Into<String>, f: F) -> TaskId
    where
        F: FnOnce() -> R + Send + 'static,
        R: TaskOutput,
    {
        self.enqueue(Some(name.into()), Box::new(FnWork::new(f)))
    }

    /// Submit a typed [`Job`]; its `name()` labels the events.
    pub fn submit_job<J: Job>(&self, job: J) -> TaskId {
        let name = job.name();
        self.enqueue(Some(name), Box::new(JobWork::new(job)))
    }

    fn enqueue(&self, name: Option<String>, work: Box<dyn UnitOfWork>) -> TaskId {
        let id = self.ids.next_task_id();
        let name = name.unwrap_or_else(|| default_task_name(id));

        self.shared
            .registry
            .insert(TaskRecord::new(id, name.clone(), self.shared.clock.now()));
        debug!(task_id = %id, name = %name, "task submitted");

        let task = QueuedTask { id, name, work };
        let sent = match &self.sender {
            Some(sender) => sender.send(task).is_ok(),
            None => false,
        };
        if !sent {
            // ワーカーが全滅している場合のみ。イベントは出さない
            self.shared.registry.remove(id);
            error!(task_id = %id, "worker queue is closed; task dropped");
        }

        id
    }

    /// Pending and running tasks, ordered by id.
    pub fn active_tasks(&self) -> Vec<TaskSnapshot> {
        self.shared.registry.snapshots()
    }

    pub fn counts(&self) -> PoolCounts {
        self.shared.registry.counts()
    }

    pub fn max_workers(&self) -> usize {
        self.config.max_workers
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Stop intake, drain the queue, and join all workers.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if self.sender.take().is_none() {
            return;
        }
        let workers = self.workers.len();
        self.workers.join();
        info!(workers, "task pool stopped");
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.stop();
    }
}
