//! In-memory runtime for unit tests.
//!
//! Records every call and serves containers, samples and logs from
//! configurable tables so the fetcher, dispatcher and state machine can be
//! exercised without a Docker daemon.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::docker::client::ContainerRuntime;
use crate::types::{AppError, ContainerOp, ContainerSummary, Result, UsageSample};

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Ping,
    List { all: bool },
    Sample { id: String },
    Start { id: String },
    Stop { id: String },
    Restart { id: String },
    Remove { id: String },
    Logs { id: String, tail: usize },
}

#[derive(Default)]
pub struct MockRuntime {
    pub calls: Arc<Mutex<Vec<MockCall>>>,
    pub containers: Arc<Mutex<Vec<ContainerSummary>>>,
    pub samples: Arc<Mutex<HashMap<String, UsageSample>>>,
    pub logs: Arc<Mutex<HashMap<String, String>>>,
    /// Container ids whose usage sample fails.
    pub broken_samples: Arc<Mutex<HashSet<String>>>,
    /// Operations that fail for every container.
    pub failing_ops: Arc<Mutex<HashSet<ContainerOp>>>,
    pub unreachable: Arc<Mutex<bool>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(containers: Vec<ContainerSummary>) -> Self {
        let mock = Self::new();
        *mock.containers.lock().unwrap() = containers;
        mock
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_sample(&self, id: &str, sample: UsageSample) {
        self.samples.lock().unwrap().insert(id.to_string(), sample);
    }

    pub fn break_sample(&self, id: &str) {
        self.broken_samples.lock().unwrap().insert(id.to_string());
    }

    pub fn fail(&self, op: ContainerOp) {
        self.failing_ops.lock().unwrap().insert(op);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_reachable(&self) -> Result<()> {
        if *self.unreachable.lock().unwrap() {
            return Err(AppError::RuntimeUnavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_op(&self, op: ContainerOp, id: &str) -> Result<()> {
        if self.failing_ops.lock().unwrap().contains(&op) {
            return Err(AppError::operation(op, format!("mock refused {}", id)));
        }
        Ok(())
    }

    fn set_status(&self, id: &str, state: &str, status: &str) {
        let mut containers = self.containers.lock().unwrap();
        if let Some(c) = containers.iter_mut().find(|c| c.id.starts_with(id)) {
            c.state = state.to_string();
            c.status = status.to_string();
        }
    }
}

pub fn summary(id: &str, name: &str, image: &str, state: &str, status: &str) -> ContainerSummary {
    ContainerSummary {
        id: id.to_string(),
        names: vec![format!("/{}", name)],
        image: image.to_string(),
        status: status.to_string(),
        state: state.to_string(),
        ports: Vec::new(),
        created: 1_700_000_000,
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn ping(&self) -> Result<()> {
        self.record(MockCall::Ping);
        self.check_reachable()
    }

    async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>> {
        self.record(MockCall::List { all: include_stopped });
        self.check_reachable()?;
        let containers = self.containers.lock().unwrap().clone();
        Ok(containers
            .into_iter()
            .filter(|c| include_stopped || c.state == "running")
            .collect())
    }

    async fn usage_sample(&self, id: &str) -> Result<UsageSample> {
        self.record(MockCall::Sample { id: id.to_string() });
        if self.broken_samples.lock().unwrap().contains(id) {
            return Err(AppError::Other(format!("stats unavailable for {}", id)));
        }
        Ok(self.samples.lock().unwrap().get(id).cloned().unwrap_or_default())
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        self.record(MockCall::Start { id: id.to_string() });
        self.check_op(ContainerOp::Start, id)?;
        self.set_status(id, "running", "Up Less than a second");
        Ok(())
    }

    async fn stop_container(&self, id: &str) -> Result<()> {
        self.record(MockCall::Stop { id: id.to_string() });
        self.check_op(ContainerOp::Stop, id)?;
        self.set_status(id, "exited", "Exited (0) Less than a second ago");
        Ok(())
    }

    async fn restart_container(&self, id: &str) -> Result<()> {
        self.record(MockCall::Restart { id: id.to_string() });
        self.check_op(ContainerOp::Restart, id)?;
        self.set_status(id, "running", "Up Less than a second");
        Ok(())
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        self.record(MockCall::Remove { id: id.to_string() });
        self.check_op(ContainerOp::Remove, id)?;
        let mut containers = self.containers.lock().unwrap();
        if containers.iter().any(|c| c.id.starts_with(id) && c.state == "running") {
            return Err(AppError::operation(
                ContainerOp::Remove,
                format!("cannot remove running container {}: stop the container before removing", id),
            ));
        }
        containers.retain(|c| !c.id.starts_with(id));
        Ok(())
    }

    async fn container_logs(&self, id: &str, tail: usize) -> Result<String> {
        self.record(MockCall::Logs { id: id.to_string(), tail });
        self.check_op(ContainerOp::Logs, id)?;
        Ok(self.logs.lock().unwrap().get(id).cloned().unwrap_or_default())
    }
}
