//! Job trait - 名前を持つ型付き unit of work
//!
//! # 学習ポイント
//! - Associated types (`Output`, `Error`)
//! - `self` を消費する `run`（一度しか実行されないことを型で表す）

use std::fmt;

use crate::domain::TaskError;

/// A unit of work that knows its own name.
///
/// Contract for collaborators (image tools, PDF tools, scanners, ...):
/// do the work synchronously inside `run`, return a value or an error,
/// and do not spawn threads; the pool supplies the concurrency.
///
/// # 使用例
/// ```ignore
/// struct CleanTempDir { path: PathBuf }
///
/// impl Job for CleanTempDir {
///     type Output = u64;
///     type Error = std::io::Error;
///
///     fn name(&self) -> String {
///         format!("Clean {}", self.path.display())
///     }
///
///     fn run(self) -> Result<u64, std::io::Error> {
///         remove_stale_files(&self.path)
///     }
/// }
///
/// let id = pool.submit_job(CleanTempDir { path });
/// ```
pub trait Job: Send + 'static {
    type Output: Send;
    type Error: fmt::Display;

    fn name(&self) -> String;

    fn run(self) -> Result<Self::Output, Self::Error>;
}

/// TaskOutput は closure の戻り値を成功/失敗に変換する
///
/// - `()` は常に成功
/// - `Result<T, E>` は `Err` のときだけ失敗（`E` の Display がメッセージになる）
///
/// 成功値そのものはプールでは保持しない。
pub trait TaskOutput {
    fn into_outcome(self) -> Result<(), TaskError>;
}

impl TaskOutput for () {
    fn into_outcome(self) -> Result<(), TaskError> {
        Ok(())
    }
}

impl<T, E: fmt::Display> TaskOutput for Result<T, E> {
    fn into_outcome(self) -> Result<(), TaskError> {
        self.map(drop).map_err(|e| TaskError::from_display(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Double(i32);

    impl Job for Double {
        type Output = i32;
        type Error = String;

        fn name(&self) -> String {
            format!("Double {}", self.0)
        }

        fn run(self) -> Result<i32, String> {
            self.0.checked_mul(2).ok_or_else(|| "overflow".to_string())
        }
    }

    #[test]
    fn job_runs_like_a_direct_call() {
        let job = Double(21);
        assert_eq!(job.name(), "Double 21");
        assert_eq!(job.run(), Ok(42));
        assert_eq!(Double(i32::MAX).run(), Err("overflow".to_string()));
    }

    #[test]
    fn unit_output_is_success() {
        assert_eq!(().into_outcome(), Ok(()));
    }

    #[test]
    fn result_output_keeps_error_text() {
        let ok: Result<u8, String> = Ok(1);
        assert_eq!(ok.into_outcome(), Ok(()));

        let err: Result<u8, &str> = Err("boom");
        assert_eq!(err.into_outcome(), Err(TaskError::new("boom")));
    }
}
