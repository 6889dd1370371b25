use std::sync::Arc;

use remotecache::{JobQueue, RefreshCoordinator, RefreshTask};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// In-process job capability: refresh tasks go over an unbounded channel
/// to a single worker task. Enqueue is fire-and-forget; nobody observes
/// a return value.
pub struct ChannelJobQueue {
    tx: mpsc::UnboundedSender<RefreshTask>,
}

impl ChannelJobQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RefreshTask>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl JobQueue for ChannelJobQueue {
    fn enqueue(&self, task: RefreshTask) {
        if self.tx.send(task).is_err() {
            warn!("refresh queue closed, dropping task");
        }
    }
}

pub async fn run_refresh_worker(
    mut rx: mpsc::UnboundedReceiver<RefreshTask>,
    coordinator: Arc<RefreshCoordinator>,
) {
    info!("refresh worker: started");

    while let Some(task) = rx.recv().await {
        info!(uri = %task.uri, requested_at = %task.requested_at, "refresh worker: task start");
        coordinator.run_refresh(&task.uri).await;
    }

    info!("refresh worker: queue closed, exiting");
}
