use std::time::Duration;
use tokio::sync::mpsc;

use crate::events::AppEvent;

/// Posts a `Tick` every `period`. The next sleep only starts once the
/// previous tick is in the queue, so there is never more than one timer
/// pending. Returns when the event loop drops its receiver.
pub async fn run_scheduler(period: Duration, tx: mpsc::Sender<AppEvent>) {
    loop {
        tokio::time::sleep(period).await;
        if tx.send(AppEvent::Tick).await.is_err() {
            tracing::debug!("event queue closed, stopping refresh scheduler");
            break;
        }
    }
}
