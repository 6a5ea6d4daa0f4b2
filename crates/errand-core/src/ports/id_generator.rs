//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **SequentialIdGenerator**: 1 から始まる連番（AtomicU64）

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ids::TaskId;

/// IdGenerator はタスク ID を払い出す
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから submit されうる）
/// - 払い出した ID は単調増加で、二度と同じ値を返さない
pub trait IdGenerator: Send + Sync {
    fn next_task_id(&self) -> TaskId;
}

#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_task_id(&self) -> TaskId {
        // fetch_add は同時呼び出しでも重複しない
        TaskId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
