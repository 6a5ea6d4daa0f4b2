//! errand-core
//!
//! Background task execution for desktop tools: a bounded worker pool that
//! runs slow operations off the caller's thread and reports each task's
//! lifecycle (`started` -> `succeeded` | `failed`) to a single observer.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, events, task record, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, TaskObserver）
//! - **typed**: unit of work の API（Job trait, closure, UnitOfWork）
//! - **app**: TaskPool 本体、builder, config, registry, progress board
//! - **impls**: observer の実装（ChannelObserver, LogObserver）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod typed;

pub use app::{PoolConfig, PoolCounts, ProgressBoard, TaskPool};
pub use domain::{PoolError, TaskError, TaskEvent, TaskId, TaskSnapshot, TaskState, TaskStatus};
pub use impls::{ChannelObserver, LogObserver, channel_observer};
pub use ports::TaskObserver;
pub use typed::Job;
