use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::App;
use crate::docker::ContainerRuntime;
use crate::events::scheduler::run_scheduler;
use crate::events::tasks::TaskRunner;
use crate::events::AppEvent;
use crate::types::Result;
use crate::ui::draw;

const EVENT_QUEUE_CAPACITY: usize = 64;
const INPUT_POLL: Duration = Duration::from_millis(250);

/// Reads terminal input on a blocking thread and forwards keys and resizes.
/// Exits once the event loop has gone away.
fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal poll failed");
                    break;
                }
            }
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Resize(_, height)) => AppEvent::Resize { height },
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    break;
                }
            };
            if tx.blocking_send(forwarded).is_err() {
                break;
            }
        }
    });
}

/// Single-writer loop: draw, take one event, update, launch whatever tasks
/// the update asked for. Runs until the app sets `should_quit`.
pub async fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runtime: Arc<dyn ContainerRuntime>,
    refresh_interval: Duration,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let runner = TaskRunner::new(runtime, tx.clone());

    spawn_input_reader(tx.clone());
    let scheduler = tokio::spawn(run_scheduler(refresh_interval, tx));

    let size = terminal.size()?;
    app.update(AppEvent::Resize { height: size.height });
    for task in app.init() {
        runner.spawn(task);
    }

    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        for task in app.update(event) {
            runner.spawn(task);
        }
    }

    scheduler.abort();
    Ok(())
}
