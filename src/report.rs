use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

use crate::docker::ContainerRuntime;
use crate::snapshot::fetch_snapshots;
use crate::types::{AppError, ContainerOp, ContainerSnapshot, Result, StatusCategory};
use crate::ui::container_list::format_uptime;
use crate::ui::styles::UsageLevel;

fn pad(s: &str, width: usize) -> String {
    let truncated: String = s.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

fn paint_status(cell: String, category: StatusCategory, color: bool) -> String {
    if !color {
        return cell;
    }
    match category {
        StatusCategory::Running => cell.green().to_string(),
        StatusCategory::Stopped => cell.red().to_string(),
        StatusCategory::Other => cell.yellow().to_string(),
    }
}

fn paint_usage(cell: String, value: f64, color: bool) -> String {
    if !color {
        return cell;
    }
    match UsageLevel::from_percent(value) {
        UsageLevel::High => cell.red().bold().to_string(),
        UsageLevel::Medium => cell.yellow().to_string(),
        UsageLevel::Low => cell.green().to_string(),
    }
}

/// The `list` table: every snapshot column, one container per line.
pub fn format_list(snapshots: &[ContainerSnapshot], color: bool) -> String {
    let mut out = format!(
        "{} {} {} {} {} {} {} {} {}\n",
        pad("CONTAINER ID", 12),
        pad("NAME", 20),
        pad("IMAGE", 25),
        pad("STATUS", 25),
        pad("PORTS", 20),
        pad("CPU%", 7),
        pad("MEM%", 7),
        pad("NETWORK", 15),
        "UPTIME",
    );

    for c in snapshots {
        let uptime = if c.is_running() {
            format_uptime(c.created)
        } else {
            "-".to_string()
        };
        out.push_str(&format!(
            "{} {} {} {} {} {} {} {} {}\n",
            pad(&c.id, 12),
            pad(&c.name, 20),
            pad(&c.image, 25),
            paint_status(pad(&c.status, 25), c.status_category(), color),
            pad(&c.ports, 20),
            pad(&format!("{:.1}", c.cpu_percent), 7),
            pad(&format!("{:.1}", c.memory_percent), 7),
            pad(&c.network, 15),
            uptime,
        ));
    }
    out
}

/// The `stats` screen, ending with a TOTAL row summing CPU% and MEMORY%.
pub fn format_stats(snapshots: &[ContainerSnapshot], color: bool) -> String {
    let mut out = format!(
        "{} {} {} {} {} {}\n",
        pad("CONTAINER ID", 12),
        pad("NAME", 20),
        pad("CPU%", 8),
        pad("MEMORY%", 8),
        pad("NETWORK I/O", 15),
        "STATUS",
    );

    let mut total_cpu = 0.0;
    let mut total_mem = 0.0;
    for c in snapshots {
        total_cpu += c.cpu_percent;
        total_mem += c.memory_percent;
        out.push_str(&format!(
            "{} {} {} {} {} {}\n",
            pad(&c.id, 12),
            pad(&c.name, 20),
            paint_usage(pad(&format!("{:.1}%", c.cpu_percent), 8), c.cpu_percent, color),
            paint_usage(pad(&format!("{:.1}%", c.memory_percent), 8), c.memory_percent, color),
            pad(&c.network, 15),
            paint_status(c.status.clone(), c.status_category(), color),
        ));
    }

    out.push_str(&format!(
        "{} {} {} {} containers\n",
        pad("TOTAL", 33),
        pad(&format!("{:.1}%", total_cpu), 8),
        pad(&format!("{:.1}%", total_mem), 8),
        snapshots.len(),
    ));
    out
}

pub async fn list(runtime: &dyn ContainerRuntime, all: bool) -> Result<()> {
    let snapshots = fetch_snapshots(runtime, all).await?;
    if snapshots.is_empty() {
        println!("No containers found");
        return Ok(());
    }
    print!("{}", format_list(&snapshots, true));
    Ok(())
}

/// Redraws usage of every container every `interval` until Ctrl+C.
pub async fn stats(runtime: &dyn ContainerRuntime, interval: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    loop {
        let snapshots = fetch_snapshots(runtime, true).await?;
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        write!(stdout, "{}", format_stats(&snapshots, true))?;
        writeln!(stdout, "\nPress Ctrl+C to exit")?;
        stdout.flush()?;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

/// Accepts a full id, an id prefix or a container name.
pub async fn resolve_container(runtime: &dyn ContainerRuntime, query: &str) -> Result<String> {
    let containers = runtime.list_containers(true).await?;
    containers
        .iter()
        .find(|c| c.id == query)
        .or_else(|| {
            containers
                .iter()
                .find(|c| c.names.iter().any(|n| n.trim_start_matches('/') == query))
        })
        .or_else(|| containers.iter().find(|c| c.id.starts_with(query)))
        .map(|c| c.id.clone())
        .ok_or_else(|| AppError::operation(ContainerOp::Logs, format!("no such container: {}", query)))
}

pub async fn logs(runtime: &dyn ContainerRuntime, query: &str, tail: usize) -> Result<()> {
    let id = resolve_container(runtime, query).await?;
    let text = runtime.container_logs(&id, tail).await?;
    print!("{}", text);
    io::stdout().flush()?;
    Ok(())
}
