//! Errors - エラー型
//!
//! - `TaskError`: unit of work の失敗。中身は表示用のテキストだけ
//! - `PoolError` / `ConfigError`: プール構築時のエラー
//!
//! `submit` 自体は失敗しない。タスクの失敗は `failed` イベントとしてのみ観測できる。

use std::fmt;

use thiserror::Error;

/// Failure of a single unit of work.
///
/// The pool does not discriminate error kinds; only the textual description
/// survives and ends up in the `failed` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskError {
    message: String,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture any displayable error.
    pub fn from_display<E: fmt::Display + ?Sized>(err: &E) -> Self {
        Self::new(err.to_string())
    }

    /// Build from a `catch_unwind` payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::new(format!("panicked: {message}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TaskError {}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_workers must be between 1 and {max} (got {got})")]
    MaxWorkersOutOfRange { got: usize, max: usize },

    #[error("thread_name_prefix must not be empty")]
    EmptyThreadNamePrefix,

    #[error("stack_size must be > 0")]
    ZeroStackSize,
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("invalid pool config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("config decode: {0}")]
    ConfigDecode(#[from] serde_json::Error),

    #[error("failed to spawn worker thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn panic_payloads_become_messages() {
        let payload = catch_unwind::<_, ()>(|| panic!("static str")).unwrap_err();
        assert_eq!(TaskError::from_panic(payload).message(), "panicked: static str");

        let n = 3;
        let payload = catch_unwind::<_, ()>(AssertUnwindSafe(|| panic!("formatted {n}"))).unwrap_err();
        assert_eq!(TaskError::from_panic(payload).to_string(), "panicked: formatted 3");
    }

    #[test]
    fn from_display_keeps_text_only() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "boom");
        let e = TaskError::from_display(&io);
        assert_eq!(e.message(), "boom");
    }

    #[test]
    fn config_error_is_wrapped() {
        let e: PoolError = ConfigError::EmptyThreadNamePrefix.into();
        assert!(e.to_string().contains("thread_name_prefix"));
    }
}
