//! TaskObserver port - ライフサイクルイベントの受け口
//!
//! プールに登録できる observer は常に一つだけ（後勝ち）。
//!
//! # スレッドについて
//! `on_event` はワーカースレッド上で呼ばれる。submit したスレッドではない。
//! UI を触りたい observer は、自分のイベントループへ積み直す責任を持つ
//! （`impls::ChannelObserver` を参照）。

use crate::domain::TaskEvent;

pub trait TaskObserver: Send + Sync {
    fn on_event(&self, event: &TaskEvent);
}

/// Closures over `&TaskEvent` are observers.
///
/// ```ignore
/// pool.set_observer(|e: &TaskEvent| println!("{} {} {}", e.task_id, e.label(), e.message));
/// ```
impl<F> TaskObserver for F
where
    F: Fn(&TaskEvent) + Send + Sync,
{
    fn on_event(&self, event: &TaskEvent) {
        self(event)
    }
}
