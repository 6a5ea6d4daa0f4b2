//! Ports - 抽象化レイヤー
//!
//! プールが外側に依存する箇所を trait として切り出す。
//! - Clock: タイムスタンプ
//! - IdGenerator: タスク ID の払い出し
//! - TaskObserver: イベントの配送先

pub mod clock;
pub mod id_generator;
pub mod observer;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, SequentialIdGenerator};
pub use self::observer::TaskObserver;
