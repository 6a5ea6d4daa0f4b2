//! ProgressBoard - UI 側のタスク進捗モデル
//!
//! UI スレッド上でイベントを `apply` していく前提（Sync ではない）。
//! - 初めて見た task_id で行を作り、以後はメッセージと状態を更新
//! - 成功した行は linger 経過後に `prune` で消える
//! - 失敗した行はユーザーが `dismiss` するまで残す

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::domain::{TaskEvent, TaskId, TaskStatus};

/// Default time a succeeded entry stays visible.
pub fn default_linger() -> TimeDelta {
    TimeDelta::seconds(5)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEntry {
    pub task_id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    pub message: String,
    pub updated_at: DateTime<Utc>,
}

impl ProgressEntry {
    /// Still running (progress indicator animating).
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[derive(Debug)]
pub struct ProgressBoard {
    entries: BTreeMap<TaskId, ProgressEntry>,
    linger: TimeDelta,
}

impl ProgressBoard {
    pub fn new() -> Self {
        Self::with_linger(default_linger())
    }

    pub fn with_linger(linger: TimeDelta) -> Self {
        Self {
            entries: BTreeMap::new(),
            linger,
        }
    }

    pub fn apply(&mut self, event: &TaskEvent) {
        let entry = self
            .entries
            .entry(event.task_id)
            .or_insert_with(|| ProgressEntry {
                task_id: event.task_id,
                name: event.name.clone(),
                status: event.status,
                message: String::new(),
                updated_at: event.at,
            });

        // 終端に達した行は後から来たイベントで巻き戻さない
        if entry.status.is_terminal() && !event.is_terminal() {
            return;
        }
        entry.status = event.status;
        entry.message.clone_from(&event.message);
        entry.updated_at = event.at;
    }

    /// Drop succeeded entries older than the linger period. Returns their ids.
    pub fn prune(&mut self, now: DateTime<Utc>) -> Vec<TaskId> {
        let expired: Vec<TaskId> = self
            .entries
            .values()
            .filter(|e| e.status == TaskStatus::Succeeded && now - e.updated_at >= self.linger)
            .map(|e| e.task_id)
            .collect();
        for id in &expired {
            self.entries.remove(id);
        }
        expired
    }

    /// Remove an entry regardless of its state (e.g. user closed a failure).
    pub fn dismiss(&mut self, id: TaskId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn get(&self, id: TaskId) -> Option<&ProgressEntry> {
        self.entries.get(&id)
    }

    /// Entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &ProgressEntry> {
        self.entries.values()
    }

    pub fn active_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ProgressBoard {
    fn default() -> Self {
        Self::new()
    }
}
