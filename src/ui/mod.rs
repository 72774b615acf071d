pub mod container_list;
pub mod filter;
pub mod help;
pub mod layout;
pub mod logs;
pub mod styles;

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View};
use crate::ui::container_list::render_container_list;
use crate::ui::filter::render_filter_input;
use crate::ui::help::render_help;
use crate::ui::layout::{get_main_layout, get_status_layout};
use crate::ui::logs::render_container_logs;
use crate::ui::styles::{error_style, help_style, status_bar_style, title_style, DANGER, PRIMARY, SUCCESS};

pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let area = f.area();
    let (header, body, status, footer) = get_main_layout(area);

    render_header(f, header, app);
    match app.view {
        View::Logs => render_container_logs(f, body, app),
        View::Containers | View::Filter => render_container_list(f, body, app),
    }
    render_status(f, status, app);
    render_footer(f, footer, app);

    if app.view == View::Filter {
        render_filter_input(f, area, app);
    }
    if app.show_help {
        render_help(f, area);
    }
}

fn render_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let title = match app.view {
        View::Logs => {
            let target = app.log_target.as_deref().unwrap_or("-");
            let name = app
                .all_containers
                .iter()
                .find(|c| c.id == target)
                .map(|c| format!(" ({})", c.name))
                .unwrap_or_default();
            format!("Logs - {}{}", target, name)
        }
        _ => "dockdash".to_string(),
    };

    let running = app.running_count();
    let total = app.all_containers.len();
    let line = Line::from(vec![
        Span::styled(title, title_style()),
        Span::raw("  "),
        Span::styled(format!("{} running", running), Style::default().fg(SUCCESS)),
        Span::raw(" / "),
        Span::styled(
            format!("{} stopped", total.saturating_sub(running)),
            Style::default().fg(DANGER),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PRIMARY)),
    );
    f.render_widget(header, area);
}

fn status_text(app: &App) -> String {
    let mut parts = vec![format!("Containers: {}", app.containers.len())];
    if !app.filter.is_empty() {
        parts.push(format!("Filter: {}", app.filter));
    }
    parts.push(format!(
        "Showing: {}",
        if app.show_all { "all" } else { "running" }
    ));
    if app.loading {
        parts.push("Refreshing...".to_string());
    }
    if let Some(at) = app.last_updated {
        parts.push(format!("Updated {}", at.format("%H:%M:%S")));
    }
    parts.join(" | ")
}

fn render_status(f: &mut Frame<'_>, area: Rect, app: &App) {
    let (bar, error) = get_status_layout(area);

    f.render_widget(
        Paragraph::new(format!(" {}", status_text(app))).style(status_bar_style()),
        bar,
    );

    if let Some(err) = &app.error {
        let message = err.to_string();
        let first_line = message.lines().next().unwrap_or_default();
        f.render_widget(
            Paragraph::new(format!(" Error: {}", first_line)).style(error_style()),
            error,
        );
    }
}

fn render_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let keys = match app.view {
        View::Containers => {
            "↑/↓: Navigate • s: Start • t: Stop • r: Restart • d: Remove • l: Logs • f: Filter • a: All • F5: Refresh • ?: Help • q: Quit"
        }
        View::Logs => "↑/↓: Scroll • PgUp/PgDn: Page • Home/End: Top/Bottom • esc: Back • q: Quit",
        View::Filter => "Enter: Apply • esc: Cancel",
    };
    f.render_widget(
        Paragraph::new(keys).style(help_style()).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::summary;
    use crate::events::{AppEvent, Task};
    use crate::metrics::Metrics;
    use crate::snapshot::build_snapshot;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn app_showing_logs(height: u16) -> App {
        let mut app = App::new(false, true, 100);
        let Task::Refresh { seq, .. } = app.init()[0].clone() else {
            panic!("expected refresh");
        };
        let rows = vec![build_snapshot(
            summary("abc123", "web", "nginx", "running", "Up 1 minute"),
            Metrics::default(),
        )];
        app.update(AppEvent::Refreshed { seq, result: Ok(rows) });
        app.update(AppEvent::Resize { height });
        app.update(AppEvent::Key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE)));

        let text: String = (1..=20).map(|i| format!("line{:02}\n", i)).collect();
        app.update(AppEvent::LogsLoaded { id: "abc123".into(), result: Ok(text) });
        app
    }

    fn draw_logs(width: u16, height: u16) -> Vec<String> {
        let mut app = app_showing_logs(height);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        screen(&terminal)
    }

    #[test]
    fn log_pane_fills_with_newest_lines() {
        let rows = draw_logs(60, 24);
        let text = rows.join("\n");

        assert!(text.contains("line20"));
        assert!(text.contains("line05"));
        assert!(!text.contains("line04"));
        assert!(text.contains("Logs - abc123 (web)"));
    }

    #[test]
    fn tiny_terminal_still_shows_last_log_line() {
        let rows = draw_logs(60, 9);
        let text = rows.join("\n");

        assert!(text.contains("line20"));
        assert!(!text.contains("line19"));
    }

    #[test]
    fn status_line_reflects_filter_and_loading() {
        let mut app = App::new(false, true, 100);
        assert_eq!(status_text(&app), "Containers: 0 | Showing: all");

        app.filter = "web".to_string();
        app.show_all = false;
        app.loading = true;
        assert_eq!(
            status_text(&app),
            "Containers: 0 | Filter: web | Showing: running | Refreshing..."
        );
    }
}
