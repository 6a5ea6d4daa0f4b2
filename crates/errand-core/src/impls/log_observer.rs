//! LogObserver - イベントを tracing に流すだけの observer
//!
//! UI を持たない実行（CLI、バッチ）での既定の observer として使う。

use tracing::{info, warn};

use crate::domain::{TaskEvent, TaskStatus};
use crate::ports::TaskObserver;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl TaskObserver for LogObserver {
    fn on_event(&self, event: &TaskEvent) {
        match event.status {
            TaskStatus::Started | TaskStatus::Succeeded => {
                info!(task_id = %event.task_id, status = %event.status, "{}", event.message);
            }
            TaskStatus::Failed => {
                warn!(task_id = %event.task_id, status = %event.status, "{}", event.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TaskPool;
    use std::sync::Arc;

    #[test]
    fn logs_every_status_without_panicking() {
        let pool = TaskPool::builder().max_workers(1).build().unwrap();
        pool.set_shared_observer(Arc::new(LogObserver::new()));
        assert!(pool.has_observer());

        pool.submit_named("ok", || ());
        pool.submit_named("bad", || Err::<(), _>("nope"));
        pool.shutdown();
    }
}
