//! WorkerGroup - 固定数のワーカースレッド
//!
//! 全ワーカーが一つの FIFO キュー（crossbeam の MPMC channel）から仕事を取る。
//! - 空いているワーカーが先頭のタスクを取る
//! - Sender が drop されると、残りのキューを掃き出してから終了する

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use tracing::{debug, warn};

use super::config::PoolConfig;
use super::pool::PoolShared;
use crate::domain::{PoolError, TaskId, WorkerId};
use crate::typed::UnitOfWork;

/// One queued submission: what the worker needs to run and report it.
pub(crate) struct QueuedTask {
    pub(crate) id: TaskId,
    pub(crate) name: String,
    pub(crate) work: Box<dyn UnitOfWork>,
}

/// Worker group handle.
/// - キューの Sender 側を閉じると全ワーカーが止まる
/// - `join()` で全ワーカーの終了を待てる
pub(crate) struct WorkerGroup {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerGroup {
    /// Spawn `config.max_workers` named threads.
    pub(crate) fn spawn(
        config: &PoolConfig,
        queue: Receiver<QueuedTask>,
        shared: Arc<PoolShared>,
    ) -> Result<Self, PoolError> {
        let mut handles = Vec::with_capacity(config.max_workers);

        for n in 0..config.max_workers {
            let worker_id = WorkerId::new(n as u64);
            let name = format!("{}-{}", config.thread_name_prefix, n);

            let mut builder = thread::Builder::new().name(name.clone());
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let rx = queue.clone();
            let shared = Arc::clone(&shared);
            // spawn に失敗した場合、呼び出し側が Sender を drop するので
            // 既に起動したワーカーもそのまま終了する
            let handle = builder
                .spawn(move || worker_loop(worker_id, rx, shared))
                .map_err(|source| PoolError::Spawn { name, source })?;
            handles.push(handle);
        }

        Ok(Self { handles })
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every worker to exit. The queue's sender must already be closed.
    pub(crate) fn join(&mut self) {
        let current = thread::current().id();
        for handle in self.handles.drain(..) {
            // ワーカー自身（observer 内など）から止められた場合は自分を join しない
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                warn!("worker thread exited with a panic");
            }
        }
    }
}

fn worker_loop(worker_id: WorkerId, queue: Receiver<QueuedTask>, shared: Arc<PoolShared>) {
    debug!(%worker_id, "worker started");

    // recv は Sender が全て閉じ、かつキューが空になったときだけ Err を返す
    while let Ok(task) = queue.recv() {
        shared.execute(worker_id, task);
    }

    debug!(%worker_id, "worker stopped");
}
