use crate::docker::client::DockerClient;
use crate::types::{AppError, NetworkCounters, Result, UsageSample};
use bollard::container::{Stats, StatsOptions};
use futures::StreamExt;

/// One-shot stats call. `stream: false` makes the engine wait for a second
/// reading so the `precpu_*` counters are populated.
pub async fn fetch_usage_sample(client: &DockerClient, id: &str) -> Result<UsageSample> {
    let mut stats_stream = client.inner.stats(
        id,
        Some(StatsOptions {
            stream: false,
            ..Default::default()
        }),
    );

    match stats_stream.next().await {
        Some(Ok(stats)) => Ok(usage_from_stats(stats)),
        Some(Err(e)) => Err(AppError::Docker(e)),
        None => Err(AppError::Other(format!("no stats returned for {}", id))),
    }
}

fn usage_from_stats(stats: Stats) -> UsageSample {
    let networks = stats
        .networks
        .unwrap_or_default()
        .into_iter()
        .map(|(name, n)| {
            (
                name,
                NetworkCounters {
                    rx_bytes: n.rx_bytes,
                    tx_bytes: n.tx_bytes,
                },
            )
        })
        .collect();

    UsageSample {
        cpu_total: stats.cpu_stats.cpu_usage.total_usage,
        precpu_total: stats.precpu_stats.cpu_usage.total_usage,
        system_total: stats.cpu_stats.system_cpu_usage.unwrap_or(0),
        presystem_total: stats.precpu_stats.system_cpu_usage.unwrap_or(0),
        online_cpus: stats.cpu_stats.online_cpus,
        percpu_count: stats.cpu_stats.cpu_usage.percpu_usage.as_ref().map(|p| p.len()),
        memory_usage: stats.memory_stats.usage.unwrap_or(0),
        memory_limit: stats.memory_stats.limit.unwrap_or(0),
        networks,
    }
}
