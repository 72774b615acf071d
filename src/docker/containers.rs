use crate::docker::client::DockerClient;
use crate::types::{AppError, ContainerOp, ContainerSummary, PortMapping, Result};
use bollard::container::{ListContainersOptions, RemoveContainerOptions};

pub async fn list_containers(client: &DockerClient, all: bool) -> Result<Vec<ContainerSummary>> {
    let options = ListContainersOptions::<String> {
        all,
        ..Default::default()
    };

    let containers = client
        .inner
        .list_containers(Some(options))
        .await
        .map_err(|e| AppError::RuntimeUnavailable(e.to_string()))?;

    let summaries = containers
        .into_iter()
        .map(|c| {
            let ports = c
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(|p| PortMapping {
                    private_port: p.private_port,
                    public_port: p.public_port,
                    protocol: p.typ.map(|t| t.to_string()).unwrap_or_default(),
                })
                .collect();

            ContainerSummary {
                id: c.id.unwrap_or_default(),
                names: c.names.unwrap_or_default(),
                image: c.image.unwrap_or_default(),
                status: c.status.unwrap_or_default(),
                state: c.state.unwrap_or_else(|| "unknown".to_string()),
                ports,
                created: c.created.unwrap_or(0),
            }
        })
        .collect();

    Ok(summaries)
}

pub async fn start_container(client: &DockerClient, id: &str) -> Result<()> {
    client
        .inner
        .start_container::<String>(id, None)
        .await
        .map_err(|e| AppError::operation(ContainerOp::Start, e))
}

pub async fn stop_container(client: &DockerClient, id: &str) -> Result<()> {
    client
        .inner
        .stop_container(id, None)
        .await
        .map_err(|e| AppError::operation(ContainerOp::Stop, e))
}

pub async fn restart_container(client: &DockerClient, id: &str) -> Result<()> {
    client
        .inner
        .restart_container(id, None)
        .await
        .map_err(|e| AppError::operation(ContainerOp::Restart, e))
}

pub async fn remove_container(client: &DockerClient, id: &str) -> Result<()> {
    // Not forced: the engine refuses to remove a running container.
    client
        .inner
        .remove_container(id, Some(RemoveContainerOptions::default()))
        .await
        .map_err(|e| AppError::operation(ContainerOp::Remove, e))
}
