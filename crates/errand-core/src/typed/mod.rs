//! Typed - unit of work の API
//!
//! # 二層構造
//! - **表層（Typed）**: `Job` trait, closure + `TaskOutput` - 呼び出し側が書くもの
//! - **内部（Dyn）**: `UnitOfWork` trait - object-safe, キューに積む形

pub mod job;
pub mod work;

pub use self::job::{Job, TaskOutput};
pub use self::work::{FnWork, JobWork, UnitOfWork};
