use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::docker::ContainerRuntime;
use crate::metrics::Metrics;
use crate::types::{AppError, ContainerSnapshot, ContainerSummary, PortMapping, Result};

const SHORT_ID_LEN: usize = 12;
const MAX_CONCURRENT_SAMPLES: usize = 5;

/// One refresh cycle: list containers, then sample each one. A failed
/// sample only zeroes that container's metrics. Rows keep the runtime's
/// list order.
pub async fn fetch_snapshots(
    runtime: &dyn ContainerRuntime,
    include_stopped: bool,
) -> Result<Vec<ContainerSnapshot>> {
    let summaries = runtime
        .list_containers(include_stopped)
        .await
        .map_err(|e| match e {
            AppError::RuntimeUnavailable(_) => e,
            other => AppError::RuntimeUnavailable(other.to_string()),
        })?;

    let ids: Vec<String> = summaries.iter().map(|s| s.id.clone()).collect();
    let metrics: Vec<Metrics> = stream::iter(ids)
        .map(|id| async move {
            match runtime.usage_sample(&id).await {
                Ok(sample) => Metrics::from_sample(&sample),
                Err(e) => {
                    tracing::debug!(container = %id, error = %e, "usage sample failed");
                    Metrics::default()
                }
            }
        })
        .buffered(MAX_CONCURRENT_SAMPLES)
        .collect()
        .await;

    Ok(summaries
        .into_iter()
        .zip(metrics)
        .map(|(summary, metrics)| build_snapshot(summary, metrics))
        .collect())
}

pub fn build_snapshot(summary: ContainerSummary, metrics: Metrics) -> ContainerSnapshot {
    let name = summary
        .names
        .first()
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_default();

    ContainerSnapshot {
        id: summary.id.chars().take(SHORT_ID_LEN).collect(),
        name,
        image: summary.image,
        status: summary.status,
        state: summary.state,
        ports: format_ports(&summary.ports),
        created: DateTime::<Utc>::from_timestamp(summary.created, 0).unwrap_or_default(),
        cpu_percent: metrics.cpu_percent,
        memory_percent: metrics.memory_percent,
        network: metrics.network,
    }
}

/// Published ports only, as `public->private/proto`.
pub fn format_ports(ports: &[PortMapping]) -> String {
    ports
        .iter()
        .filter_map(|p| {
            p.public_port
                .map(|public| format!("{}->{}/{}", public, p.private_port, p.protocol))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
