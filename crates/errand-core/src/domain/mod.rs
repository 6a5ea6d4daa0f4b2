//! Domain model (IDs, states, events, records, errors).
//!
//! このモジュールはスレッドやキューを前提にしない。
//! タスクの「形」と状態遷移のルールだけを定義する。

pub mod errors;
pub mod events;
pub mod ids;
pub mod state;
pub mod task;

pub use self::errors::{ConfigError, PoolError, TaskError};
pub use self::events::TaskEvent;
pub use self::ids::{TaskId, WorkerId};
pub use self::state::{TaskState, TaskStatus};
pub use self::task::{TaskRecord, TaskSnapshot, default_task_name};
