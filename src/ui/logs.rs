use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles::PRIMARY;

fn line_style(line: &str) -> Style {
    let lower = line.to_lowercase();
    if lower.contains("error") {
        Style::default().fg(Color::Red)
    } else if lower.contains("warn") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Draws the pane and keeps the viewport height equal to the rows actually
/// shown, so scrolling and "follow tail" match what is on screen.
pub fn render_container_logs(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    app.log_view.resize(area.height.saturating_sub(2));
    let view = &app.log_view;
    let visible = view.height as usize;

    let lines: Vec<Line> = view
        .lines
        .iter()
        .skip(view.offset)
        .take(visible)
        .map(|l| Line::from(Span::styled(l.as_str(), line_style(l))))
        .collect();

    let position = if view.lines.is_empty() {
        if app.loading {
            " loading... ".to_string()
        } else {
            " empty ".to_string()
        }
    } else {
        let last = (view.offset + visible).min(view.lines.len());
        let tail = if view.at_bottom() { " (end)" } else { "" };
        format!(" {}-{} of {}{} ", view.offset + 1, last, view.lines.len(), tail)
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PRIMARY))
            .title(" Output ")
            .title_bottom(Line::from(position).right_aligned()),
    );

    f.render_widget(paragraph, area);
}
