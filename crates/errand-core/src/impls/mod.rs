//! Impls - observer の実装
//!
//! # 含まれる実装
//! - **ChannelObserver**: tokio の mpsc channel 経由で UI ループへ積み直す
//! - **LogObserver**: tracing へ書き出す

pub mod channel_observer;
pub mod log_observer;

pub use self::channel_observer::{ChannelObserver, channel_observer};
pub use self::log_observer::LogObserver;
