use crate::types::{NetworkCounters, UsageSample};

const MB: f64 = 1024.0 * 1024.0;
const SAMPLED_INTERFACE: &str = "eth0";

/// Computed figures for one container. `Default` is the all-zero value used
/// whenever a sample is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub network: String,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            cpu_percent: 0.0,
            memory_percent: 0.0,
            network: format_network(NetworkCounters::default()),
        }
    }
}

impl Metrics {
    pub fn from_sample(sample: &UsageSample) -> Self {
        Self {
            cpu_percent: cpu_percent(sample),
            memory_percent: memory_percent(sample.memory_usage, sample.memory_limit),
            network: format_network(network_counters(sample)),
        }
    }
}

pub fn cpu_percent(sample: &UsageSample) -> f64 {
    let cpu_delta = sample.cpu_total.saturating_sub(sample.precpu_total);
    let system_delta = sample.system_total.saturating_sub(sample.presystem_total);

    if system_delta == 0 || cpu_delta == 0 {
        return 0.0;
    }

    (cpu_delta as f64 / system_delta as f64) * core_count(sample) as f64 * 100.0
}

fn core_count(sample: &UsageSample) -> u64 {
    sample
        .online_cpus
        .filter(|n| *n > 0)
        .or_else(|| sample.percpu_count.filter(|n| *n > 0).map(|n| n as u64))
        .unwrap_or(1)
}

pub fn memory_percent(usage: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    usage as f64 / limit as f64 * 100.0
}

/// Counters for `eth0`, or the sum over every interface when the engine does
/// not report one by that name.
pub fn network_counters(sample: &UsageSample) -> NetworkCounters {
    if let Some(eth0) = sample.networks.get(SAMPLED_INTERFACE) {
        return *eth0;
    }
    sample
        .networks
        .values()
        .fold(NetworkCounters::default(), |acc, n| NetworkCounters {
            rx_bytes: acc.rx_bytes.saturating_add(n.rx_bytes),
            tx_bytes: acc.tx_bytes.saturating_add(n.tx_bytes),
        })
}

pub fn format_network(counters: NetworkCounters) -> String {
    format!(
        "↓{:.1}M/↑{:.1}M",
        counters.rx_bytes as f64 / MB,
        counters.tx_bytes as f64 / MB
    )
}
