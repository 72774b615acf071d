use std::sync::Arc;
use tokio::sync::mpsc;

use crate::docker::ContainerRuntime;
use crate::events::{AppEvent, Task};
use crate::snapshot::fetch_snapshots;
use crate::types::{LifecycleOp, Result};

/// Runs `Task`s on the tokio runtime and posts each outcome back to the
/// event loop. Never touches application state itself.
#[derive(Clone)]
pub struct TaskRunner {
    runtime: Arc<dyn ContainerRuntime>,
    tx: mpsc::Sender<AppEvent>,
}

impl TaskRunner {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, tx: mpsc::Sender<AppEvent>) -> Self {
        Self { runtime, tx }
    }

    pub fn spawn(&self, task: Task) -> tokio::task::JoinHandle<()> {
        let runner = self.clone();
        tokio::spawn(async move {
            let event = runner.execute(task).await;
            if runner.tx.send(event).await.is_err() {
                tracing::debug!("event loop closed before task finished");
            }
        })
    }

    pub async fn execute(&self, task: Task) -> AppEvent {
        match task {
            Task::Refresh {
                seq,
                include_stopped,
            } => AppEvent::Refreshed {
                seq,
                result: fetch_snapshots(self.runtime.as_ref(), include_stopped).await,
            },
            Task::Lifecycle { op, id } => {
                let result = self.lifecycle(op, &id).await;
                AppEvent::CommandFinished { op, id, result }
            }
            Task::LoadLogs { id, tail } => {
                let result = self.runtime.container_logs(&id, tail).await;
                AppEvent::LogsLoaded { id, result }
            }
        }
    }

    async fn lifecycle(&self, op: LifecycleOp, id: &str) -> Result<()> {
        match op {
            LifecycleOp::Start => self.runtime.start_container(id).await,
            LifecycleOp::Stop => self.runtime.stop_container(id).await,
            LifecycleOp::Restart => self.runtime.restart_container(id).await,
            LifecycleOp::Remove => self.runtime.remove_container(id).await,
        }
    }
}
