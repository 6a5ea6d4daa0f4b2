//! PoolConfig - ワーカープールの設定
//!
//! - `Default` で 4 ワーカー
//! - builder で組み立てて `build()` 時に検証（Fail-fast）
//! - JSON からも読める（欠けたフィールドは既定値）

use serde::{Deserialize, Serialize};

use crate::domain::{ConfigError, PoolError};

pub const DEFAULT_MAX_WORKERS: usize = 4;
pub const MAX_WORKERS_LIMIT: usize = 256;
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "errand-worker";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Upper bound on concurrently executing tasks. Extra submissions queue.
    pub max_workers: usize,

    /// Worker threads are named `{prefix}-{n}`.
    pub thread_name_prefix: String,

    /// Stack size for worker threads in bytes; platform default when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_size: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            stack_size: None,
        }
    }
}

impl PoolConfig {
    pub fn builder() -> PoolConfigBuilder {
        PoolConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 || self.max_workers > MAX_WORKERS_LIMIT {
            return Err(ConfigError::MaxWorkersOutOfRange {
                got: self.max_workers,
                max: MAX_WORKERS_LIMIT,
            });
        }
        if self.thread_name_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyThreadNamePrefix);
        }
        if self.stack_size == Some(0) {
            return Err(ConfigError::ZeroStackSize);
        }
        Ok(())
    }

    /// Decode from JSON and validate.
    pub fn from_json_str(s: &str) -> Result<Self, PoolError> {
        let config: PoolConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Default)]
pub struct PoolConfigBuilder {
    config: PoolConfig,
}

impl PoolConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
        }
    }

    pub fn max_workers(mut self, n: usize) -> Self {
        self.config.max_workers = n;
        self
    }

    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.config.stack_size = Some(bytes);
        self
    }

    pub fn build(self) -> Result<PoolConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        let config = PoolConfig::default();
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.thread_name_prefix, "errand-worker");
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(MAX_WORKERS_LIMIT + 1)]
    fn max_workers_out_of_range_is_rejected(#[case] n: usize) {
        let err = PoolConfig::builder().max_workers(n).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::MaxWorkersOutOfRange {
                got: n,
                max: MAX_WORKERS_LIMIT
            }
        );
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(MAX_WORKERS_LIMIT)]
    fn max_workers_in_range_is_accepted(#[case] n: usize) {
        let config = PoolConfig::builder().max_workers(n).build().unwrap();
        assert_eq!(config.max_workers, n);
    }

    #[test]
    fn blank_prefix_and_zero_stack_are_rejected() {
        let err = PoolConfig::builder().thread_name_prefix("  ").build();
        assert_eq!(err.unwrap_err(), ConfigError::EmptyThreadNamePrefix);

        let err = PoolConfig::builder().stack_size(0).build();
        assert_eq!(err.unwrap_err(), ConfigError::ZeroStackSize);
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = PoolConfig::from_json_str(r#"{ "max_workers": 2 }"#).unwrap();
        assert_eq!(config.max_workers, 2);
        assert_eq!(config.thread_name_prefix, DEFAULT_THREAD_NAME_PREFIX);
        assert_eq!(config.stack_size, None);
    }

    #[test]
    fn json_is_validated() {
        let err = PoolConfig::from_json_str(r#"{ "max_workers": 0 }"#).unwrap_err();
        assert!(matches!(err, PoolError::InvalidConfig(_)));

        let err = PoolConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, PoolError::ConfigDecode(_)));
    }
}
