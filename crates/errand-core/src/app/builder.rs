//! TaskPoolBuilder - プールの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 設定が不正なら build() がエラーを返す
//! - ports の差し替え（テストでは FixedClock など）

use std::sync::Arc;

use super::config::PoolConfig;
use super::pool::TaskPool;
use crate::domain::PoolError;
use crate::ports::{Clock, IdGenerator, SequentialIdGenerator, SystemClock, TaskObserver};

/// TaskPoolBuilder は TaskPool を構築
///
/// # 使用例
/// ```ignore
/// let pool = TaskPool::builder()
///     .max_workers(2)
///     .observer(LogObserver::new())
///     .build()?;
/// ```
pub struct TaskPoolBuilder {
    config: PoolConfig,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    observer: Option<Arc<dyn TaskObserver>>,
}

impl TaskPoolBuilder {
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
            clock: Arc::new(SystemClock),
            ids: Arc::new(SequentialIdGenerator::new()),
            observer: None,
        }
    }

    pub fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_workers(mut self, n: usize) -> Self {
        self.config.max_workers = n;
        self
    }

    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn id_generator<G: IdGenerator + 'static>(mut self, ids: G) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Observer registered before the first task can run.
    pub fn observer<O: TaskObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Validate the config and spawn the workers.
    pub fn build(self) -> Result<TaskPool, PoolError> {
        TaskPool::from_parts(self.config, self.clock, self.ids, self.observer)
    }
}

impl Default for TaskPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::DEFAULT_THREAD_NAME_PREFIX;
    use crate::domain::{ConfigError, TaskId};

    #[test]
    fn build_success() {
        let pool = TaskPool::builder().max_workers(2).build().unwrap();
        assert_eq!(pool.max_workers(), 2);
        assert_eq!(pool.config().thread_name_prefix, DEFAULT_THREAD_NAME_PREFIX);
        assert_eq!(pool.config().stack_size, None);
        assert!(pool.counts().is_idle());
    }

    #[test]
    fn build_rejects_invalid_config() {
        let result = TaskPool::builder().max_workers(0).build();
        assert!(matches!(
            result,
            Err(PoolError::InvalidConfig(ConfigError::MaxWorkersOutOfRange { got: 0, .. }))
        ));
    }

    #[test]
    fn custom_id_generator_is_used() {
        let pool = TaskPool::builder()
            .max_workers(1)
            .id_generator(SequentialIdGenerator::starting_at(100))
            .build()
            .unwrap();
        assert_eq!(pool.submit(|| ()), TaskId::new(100));
        assert_eq!(pool.submit(|| ()), TaskId::new(101));
    }
}
