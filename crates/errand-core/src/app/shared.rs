//! プロセス共有のプール
//!
//! アプリ全体で一つのプールとイベントストリームを共有したい場合の入口。
//! 最初の構築が勝ち、以後の呼び出しは設定を無視して同じインスタンスを返す。
//! 可能な箇所では `&TaskPool` を明示的に渡す方がよい。

use once_cell::sync::OnceCell;

use super::config::PoolConfig;
use super::pool::TaskPool;
use crate::domain::PoolError;

static SHARED: OnceCell<TaskPool> = OnceCell::new();

impl TaskPool {
    /// The process-wide pool, created with the default config on first use.
    pub fn shared() -> Result<&'static TaskPool, PoolError> {
        Self::shared_with(PoolConfig::default())
    }

    /// The process-wide pool. `config` only matters for the first call.
    pub fn shared_with(config: PoolConfig) -> Result<&'static TaskPool, PoolError> {
        SHARED.get_or_try_init(|| TaskPool::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_construction_wins() {
        let a = TaskPool::shared_with(PoolConfig::builder().max_workers(3).build().unwrap())
            .unwrap();
        let b = TaskPool::shared_with(PoolConfig::builder().max_workers(7).build().unwrap())
            .unwrap();
        let c = TaskPool::shared().unwrap();

        assert!(std::ptr::eq(a, b));
        assert!(std::ptr::eq(a, c));
        assert_eq!(b.max_workers(), 3);
    }
}
