use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::layout::centered_rect;
use crate::ui::styles::{help_style, MUTED, PRIMARY};

pub fn render_filter_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let popup_area = centered_rect(60, 4, area);
    f.render_widget(Clear, popup_area);

    let input = if app.filter_input.is_empty() {
        Span::styled("Filter by name, status, image...", Style::default().fg(MUTED))
    } else {
        Span::raw(app.filter_input.as_str())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)),
            input,
            Span::styled("█", Style::default().fg(PRIMARY)),
        ]),
        Line::from(Span::styled("Enter: Apply • esc: Cancel • Ctrl+U: Clear", help_style())),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PRIMARY))
            .title(" Filter Containers "),
    );
    f.render_widget(paragraph, popup_area);
}
