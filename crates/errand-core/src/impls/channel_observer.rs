//! ChannelObserver - イベントを UI のイベントループへ積み直す observer
//!
//! ワーカースレッド上で呼ばれた `on_event` はイベントを channel に送るだけ。
//! UI 側は自分のスレッド（async のイベントループ）で `recv().await` して描画する。

use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::TaskEvent;
use crate::ports::TaskObserver;

#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<TaskEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<TaskEvent>) -> Self {
        Self { tx }
    }
}

/// Observer plus the receiving end for the UI loop.
pub fn channel_observer() -> (ChannelObserver, mpsc::UnboundedReceiver<TaskEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelObserver::new(tx), rx)
}

impl TaskObserver for ChannelObserver {
    fn on_event(&self, event: &TaskEvent) {
        // unbounded なので送信でワーカーがブロックすることはない
        if self.tx.send(event.clone()).is_err() {
            trace!(task_id = %event.task_id, "event receiver closed");
        }
    }
}
