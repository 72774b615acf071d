use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::layout::centered_rect;
use crate::ui::styles::{help_style, PRIMARY, WARNING};

const BINDINGS: [(&str, &str); 14] = [
    ("↑/k ↓/j", "Move selection"),
    ("Home/g End/G", "First / last container"),
    ("PgUp PgDn", "Page through the table"),
    ("s", "Start container"),
    ("t", "Stop container"),
    ("r", "Restart container"),
    ("d", "Remove container"),
    ("l / Enter", "Show logs"),
    ("f / /", "Filter by name, status or image"),
    ("F5", "Refresh now"),
    ("a", "Toggle stopped containers"),
    ("esc", "Back"),
    ("?", "Toggle this help"),
    ("q / Ctrl+C", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(60, BINDINGS.len() as u16 + 4, area);
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>14}  ", key),
                    Style::default().fg(WARNING).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*desc),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("esc / ? / q to close", help_style())).alignment(Alignment::Center));

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD))
            .title(" Help "),
    );
    f.render_widget(help, popup_area);
}
