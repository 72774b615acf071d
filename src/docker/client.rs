use async_trait::async_trait;
use bollard::Docker;

use crate::docker::containers::{
    list_containers, remove_container, restart_container, start_container, stop_container,
};
use crate::docker::logs::fetch_logs;
use crate::docker::stats::fetch_usage_sample;
use crate::types::{AppError, ContainerSummary, Result, UsageSample};

/// Everything the dashboard needs from a container engine. All calls are
/// keyed by container identifier and may run concurrently.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Fails with `RuntimeUnavailable` when the engine cannot be reached.
    async fn ping(&self) -> Result<()>;

    async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>>;

    async fn usage_sample(&self, id: &str) -> Result<UsageSample>;

    async fn start_container(&self, id: &str) -> Result<()>;

    async fn stop_container(&self, id: &str) -> Result<()>;

    async fn restart_container(&self, id: &str) -> Result<()>;

    async fn remove_container(&self, id: &str) -> Result<()>;

    async fn container_logs(&self, id: &str, tail: usize) -> Result<String>;
}

#[derive(Clone)]
pub struct DockerClient {
    pub(crate) inner: Docker,
}

impl DockerClient {
    pub fn new() -> Result<Self> {
        let inner = Docker::connect_with_local_defaults()
            .map_err(|e| AppError::RuntimeUnavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ContainerRuntime for DockerClient {
    async fn ping(&self) -> Result<()> {
        self.inner
            .ping()
            .await
            .map(|_| ())
            .map_err(|e| AppError::RuntimeUnavailable(e.to_string()))
    }

    async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>> {
        list_containers(self, include_stopped).await
    }

    async fn usage_sample(&self, id: &str) -> Result<UsageSample> {
        fetch_usage_sample(self, id).await
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        start_container(self, id).await
    }

    async fn stop_container(&self, id: &str) -> Result<()> {
        stop_container(self, id).await
    }

    async fn restart_container(&self, id: &str) -> Result<()> {
        restart_container(self, id).await
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        remove_container(self, id).await
    }

    async fn container_logs(&self, id: &str, tail: usize) -> Result<String> {
        fetch_logs(self, id, tail).await
    }
}
