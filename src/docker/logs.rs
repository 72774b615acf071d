use crate::docker::client::DockerClient;
use crate::types::{AppError, ContainerOp, Result};
use bollard::container::LogsOptions;
use futures::StreamExt;

/// Last `tail` lines of stdout and stderr, concatenated in arrival order.
pub async fn fetch_logs(client: &DockerClient, container_id: &str, tail: usize) -> Result<String> {
    let options = LogsOptions::<String> {
        stdout: true,
        stderr: true,
        follow: false,
        tail: tail.to_string(),
        ..Default::default()
    };

    let mut stream = client.inner.logs(container_id, Some(options));
    let mut out = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::operation(ContainerOp::Logs, e))?;
        out.push_str(&chunk.to_string());
    }

    Ok(out)
}
