use ratatui::style::{Color, Modifier, Style};

use crate::types::StatusCategory;

pub const PRIMARY: Color = Color::Indexed(69);
pub const SECONDARY: Color = Color::Indexed(99);
pub const SUCCESS: Color = Color::Indexed(46);
pub const WARNING: Color = Color::Indexed(214);
pub const DANGER: Color = Color::Indexed(196);
pub const MUTED: Color = Color::Indexed(240);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Low,
    Medium,
    High,
}

impl UsageLevel {
    pub fn from_percent(value: f64) -> Self {
        if value > 80.0 {
            UsageLevel::High
        } else if value > 60.0 {
            UsageLevel::Medium
        } else {
            UsageLevel::Low
        }
    }
}

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn status_bar_style() -> Style {
    Style::default().fg(Color::White).bg(MUTED)
}

pub fn help_style() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::ITALIC)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(SECONDARY)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(DANGER).add_modifier(Modifier::BOLD)
}

pub fn status_style(category: StatusCategory) -> Style {
    match category {
        StatusCategory::Running => Style::default().fg(SUCCESS),
        StatusCategory::Stopped => Style::default().fg(DANGER),
        StatusCategory::Other => Style::default().fg(WARNING),
    }
}

pub fn usage_style(value: f64) -> Style {
    match UsageLevel::from_percent(value) {
        UsageLevel::High => Style::default().fg(DANGER).add_modifier(Modifier::BOLD),
        UsageLevel::Medium => Style::default().fg(WARNING),
        UsageLevel::Low => Style::default().fg(SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_levels_use_strict_thresholds() {
        assert_eq!(UsageLevel::from_percent(0.0), UsageLevel::Low);
        assert_eq!(UsageLevel::from_percent(60.0), UsageLevel::Low);
        assert_eq!(UsageLevel::from_percent(60.1), UsageLevel::Medium);
        assert_eq!(UsageLevel::from_percent(80.0), UsageLevel::Medium);
        assert_eq!(UsageLevel::from_percent(140.0), UsageLevel::High);
    }
}
