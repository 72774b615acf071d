use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::types::ContainerSnapshot;
use crate::ui::styles::{selected_style, status_style, usage_style, PRIMARY};

const FULL_COLUMNS: [(&str, u16); 9] = [
    ("ID", 12),
    ("NAME", 20),
    ("IMAGE", 25),
    ("STATUS", 15),
    ("PORTS", 20),
    ("CPU%", 8),
    ("MEMORY%", 10),
    ("NETWORK", 15),
    ("UPTIME", 15),
];

const COMPACT_COLUMNS: [(&str, u16); 5] = [
    ("ID", 12),
    ("NAME", 20),
    ("STATUS", 15),
    ("CPU%", 8),
    ("MEMORY%", 10),
];

pub fn format_uptime(created: DateTime<Utc>) -> String {
    let delta = (Utc::now() - created).num_seconds().max(0);

    let days = delta / 86400;
    let hours = (delta % 86400) / 3600;
    let minutes = (delta % 3600) / 60;

    if days > 0 {
        format!("{}d{}h", days, hours)
    } else if hours > 0 {
        format!("{}h{}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

fn truncate(s: &str, width: u16) -> String {
    let width = width as usize;
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn row_cells(c: &ContainerSnapshot, compact: bool) -> Vec<Cell<'static>> {
    let status = Cell::from(truncate(&c.status, 15)).style(status_style(c.status_category()));
    let cpu = Cell::from(format!("{:.1}", c.cpu_percent)).style(usage_style(c.cpu_percent));
    let mem = Cell::from(format!("{:.1}", c.memory_percent)).style(usage_style(c.memory_percent));

    if compact {
        return vec![
            Cell::from(c.id.clone()),
            Cell::from(truncate(&c.name, 20)).style(Style::default().fg(Color::Cyan)),
            status,
            cpu,
            mem,
        ];
    }

    let uptime = if c.is_running() {
        format_uptime(c.created)
    } else {
        "-".to_string()
    };

    vec![
        Cell::from(c.id.clone()),
        Cell::from(truncate(&c.name, 20)).style(Style::default().fg(Color::Cyan)),
        Cell::from(truncate(&c.image, 25)),
        status,
        Cell::from(truncate(&c.ports, 20)),
        cpu,
        mem,
        Cell::from(c.network.clone()),
        Cell::from(uptime),
    ]
}

pub fn render_container_list(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let columns: &[(&str, u16)] = if app.compact {
        &COMPACT_COLUMNS
    } else {
        &FULL_COLUMNS
    };

    let header_cells = columns
        .iter()
        .map(|(h, _)| Cell::from(*h).style(Style::default().fg(Color::Black).bg(PRIMARY).bold()));
    let header = Row::new(header_cells).height(1);

    let rows = app
        .containers
        .iter()
        .map(|c| Row::new(row_cells(c, app.compact)).height(1));

    let widths = columns.iter().map(|(_, w)| Constraint::Length(*w));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Containers ({}) ", app.containers.len()))
                .border_style(Style::default().fg(PRIMARY)),
        )
        .highlight_style(selected_style())
        .highlight_symbol("▶ ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn uptime_picks_the_largest_units() {
        assert_eq!(format_uptime(Utc::now() - Duration::minutes(5)), "5m");
        assert_eq!(format_uptime(Utc::now() - Duration::minutes(125)), "2h5m");
        assert_eq!(format_uptime(Utc::now() - Duration::hours(50)), "2d2h");
        assert_eq!(format_uptime(Utc::now() + Duration::hours(1)), "0m");
    }

    #[test]
    fn long_cells_are_truncated_with_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("registry.example.com/team/app", 10), "registry.…");
    }
}
