//! TaskRegistry - 実行中・待機中タスクの集合
//!
//! submit したスレッドが insert し、ワーカースレッドが更新・削除する。
//! 終端に達したタスクはここから消える（あとから結果を引く手段はない）。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::status::PoolCounts;
use crate::domain::{TaskId, TaskRecord, TaskSnapshot, TaskState};

#[derive(Debug, Default)]
pub struct TaskRegistry {
    records: Mutex<HashMap<TaskId, TaskRecord>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: TaskRecord) {
        self.records.lock().insert(record.id, record);
    }

    /// `Pending -> Running`. Returns false for unknown or non-pending ids.
    pub fn mark_running(&self, id: TaskId, at: DateTime<Utc>) -> bool {
        self.records
            .lock()
            .get_mut(&id)
            .is_some_and(|rec| rec.mark_running(at))
    }

    pub fn remove(&self, id: TaskId) -> Option<TaskRecord> {
        self.records.lock().remove(&id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.records.lock().contains_key(&id)
    }

    /// Active tasks ordered by id.
    pub fn snapshots(&self) -> Vec<TaskSnapshot> {
        let mut out: Vec<TaskSnapshot> = self
            .records
            .lock()
            .values()
            .map(TaskRecord::snapshot)
            .collect();
        out.sort_by_key(|s| s.id);
        out
    }

    pub fn counts(&self) -> PoolCounts {
        let records = self.records.lock();
        let mut counts = PoolCounts::default();
        for rec in records.values() {
            match rec.state {
                TaskState::Pending => counts.pending += 1,
                TaskState::Running => counts.running += 1,
                // 終端状態のレコードは即座に削除されるので数えない
                TaskState::Succeeded | TaskState::Failed => {}
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
