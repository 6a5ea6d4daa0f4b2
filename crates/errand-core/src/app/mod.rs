//! App - アプリケーション層
//!
//! domain と ports を組み合わせてタスク実行サービスを組み立てる。
//!
//! # 主要コンポーネント
//! - **TaskPool**: submit / set_observer の表面、ライフサイクルの通知
//! - **TaskPoolBuilder**: 構築とワイヤリング
//! - **WorkerGroup**: 固定数のワーカースレッド（内部）
//! - **TaskRegistry**: 実行中・待機中タスクの集合
//! - **ProgressBoard**: UI 側でイベントを表示用に畳み込むモデル

pub mod builder;
pub mod config;
pub mod pool;
pub mod progress;
pub mod registry;
pub mod shared;
pub mod status;
mod worker;

pub use self::builder::TaskPoolBuilder;
pub use self::config::{PoolConfig, PoolConfigBuilder};
pub use self::pool::TaskPool;
pub use self::progress::{ProgressBoard, ProgressEntry};
pub use self::registry::TaskRegistry;
pub use self::status::PoolCounts;
