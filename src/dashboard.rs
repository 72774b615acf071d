use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::app::App;
use crate::config::AppConfig;
use crate::docker::ContainerRuntime;
use crate::events::handler::run_event_loop;
use crate::types::Result;

pub struct Dashboard {
    runtime: Arc<dyn ContainerRuntime>,
    app: App,
    refresh_interval: Duration,
}

impl Dashboard {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, compact: bool, config: &AppConfig) -> Self {
        Self {
            runtime,
            app: App::new(compact, config.show_all, config.log_tail_lines),
            refresh_interval: Duration::from_secs(config.refresh_interval_secs.max(1)),
        }
    }

    /// Checks the runtime is reachable, then owns the terminal until the
    /// user quits. The terminal is restored even when the loop fails.
    pub async fn run(mut self) -> Result<()> {
        self.runtime.ping().await?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        tracing::info!(interval = ?self.refresh_interval, "dashboard started");
        let res = run_event_loop(
            &mut terminal,
            &mut self.app,
            Arc::clone(&self.runtime),
            self.refresh_interval,
        )
        .await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!("dashboard stopped");
        res
    }
}
