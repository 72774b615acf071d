pub mod handler;
pub mod key_bindings;
pub mod scheduler;
pub mod tasks;

use crossterm::event::KeyEvent;

use crate::types::{ContainerSnapshot, LifecycleOp, Result};

/// Everything the update step consumes. Terminal input, timer ticks and
/// finished runtime calls all arrive through the same queue.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// New terminal height; only the number of rows affects layout state.
    Resize { height: u16 },
    Tick,
    Refreshed {
        seq: u64,
        result: Result<Vec<ContainerSnapshot>>,
    },
    CommandFinished {
        op: LifecycleOp,
        id: String,
        result: Result<()>,
    },
    LogsLoaded {
        id: String,
        result: Result<String>,
    },
}

/// A runtime call requested by the update step. The identifier is captured
/// when the task is created, not when it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Refresh { seq: u64, include_stopped: bool },
    Lifecycle { op: LifecycleOp, id: String },
    LoadLogs { id: String, tail: usize },
}
