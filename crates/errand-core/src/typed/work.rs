//! UnitOfWork - プールのキューに積まれる型消去済みの仕事
//!
//! # 学習ポイント
//! - Object-safe trait (`self: Box<Self>` で FnOnce を表現)
//! - Type erasure パターン (FnWork<F> / JobWork<J> → Box<dyn UnitOfWork>)

use super::job::{Job, TaskOutput};
use crate::domain::TaskError;

/// Object-safe form of anything the pool can run exactly once.
pub trait UnitOfWork: Send + 'static {
    fn run(self: Box<Self>) -> Result<(), TaskError>;
}

/// Wraps a zero-argument closure; arguments are captured by the closure.
pub struct FnWork<F> {
    f: F,
}

impl<F> FnWork<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, R> UnitOfWork for FnWork<F>
where
    F: FnOnce() -> R + Send + 'static,
    R: TaskOutput,
{
    fn run(self: Box<Self>) -> Result<(), TaskError> {
        (self.f)().into_outcome()
    }
}

/// Wraps a typed [`Job`].
pub struct JobWork<J> {
    job: J,
}

impl<J: Job> JobWork<J> {
    pub fn new(job: J) -> Self {
        Self { job }
    }
}

impl<J: Job> UnitOfWork for JobWork<J> {
    fn run(self: Box<Self>) -> Result<(), TaskError> {
        self.job
            .run()
            .map(drop)
            .map_err(|e| TaskError::from_display(&e))
    }
}
