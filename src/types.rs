use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A container as reported by the runtime's list call, before any metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub status: String,
    pub state: String,
    pub ports: Vec<PortMapping>,
    pub created: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub private_port: u16,
    pub public_port: Option<u16>,
    pub protocol: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Raw cumulative counters from one stats call. The engine reports the
/// previous sample alongside the current one, so a single call is enough to
/// compute rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSample {
    pub cpu_total: u64,
    pub precpu_total: u64,
    pub system_total: u64,
    pub presystem_total: u64,
    pub online_cpus: Option<u64>,
    pub percpu_count: Option<usize>,
    pub memory_usage: u64,
    pub memory_limit: u64,
    pub networks: HashMap<String, NetworkCounters>,
}

/// Display category derived from the human status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Running,
    Stopped,
    Other,
}

impl StatusCategory {
    pub fn from_status(status: &str) -> Self {
        if status.contains("Up") {
            StatusCategory::Running
        } else if status.contains("Exited") {
            StatusCategory::Stopped
        } else {
            StatusCategory::Other
        }
    }
}

/// One row of the dashboard as of one refresh cycle. Never mutated after
/// the fetcher builds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: String,
    pub state: String,
    pub ports: String,
    pub created: DateTime<Utc>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub network: String,
}

impl ContainerSnapshot {
    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::from_status(&self.status)
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Lifecycle commands. Log loading has its own task and is not one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleOp {
    Start,
    Stop,
    Restart,
    Remove,
}

impl From<LifecycleOp> for ContainerOp {
    fn from(op: LifecycleOp) -> Self {
        match op {
            LifecycleOp::Start => ContainerOp::Start,
            LifecycleOp::Stop => ContainerOp::Stop,
            LifecycleOp::Restart => ContainerOp::Restart,
            LifecycleOp::Remove => ContainerOp::Remove,
        }
    }
}

impl fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ContainerOp::from(*self).fmt(f)
    }
}

/// Every runtime operation that can fail against one container; names the
/// operation in `AppError::OperationFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerOp {
    Start,
    Stop,
    Restart,
    Remove,
    Logs,
}

impl fmt::Display for ContainerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerOp::Start => "start",
            ContainerOp::Stop => "stop",
            ContainerOp::Restart => "restart",
            ContainerOp::Remove => "remove",
            ContainerOp::Logs => "logs",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Cannot reach container runtime: {0}")]
    RuntimeUnavailable(String),
    #[error("{op} failed: {reason}")]
    OperationFailed { op: ContainerOp, reason: String },
    #[error("No container selected")]
    NoSelection,
    #[error("Docker error: {0}")]
    Docker(#[from] bollard::errors::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn operation(op: ContainerOp, reason: impl fmt::Display) -> Self {
        AppError::OperationFailed {
            op,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_categories_follow_status_text() {
        assert_eq!(StatusCategory::from_status("Up 2 minutes"), StatusCategory::Running);
        assert_eq!(StatusCategory::from_status("Exited (0) 3 hours ago"), StatusCategory::Stopped);
        assert_eq!(StatusCategory::from_status("Created"), StatusCategory::Other);
        assert_eq!(StatusCategory::from_status("Restarting (1) 5 seconds ago"), StatusCategory::Other);
    }

    #[test]
    fn operation_failed_message_names_the_operation() {
        let err = AppError::operation(ContainerOp::Stop, "container not running");
        assert_eq!(err.to_string(), "stop failed: container not running");
        assert_eq!(AppError::NoSelection.to_string(), "No container selected");
    }
}
