use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};

/// Input poll interval; also how often finished requests are picked up.
pub const TICK: Duration = Duration::from_millis(75);

pub const TITLE: &str = "Print Jobs";
pub const FORM_TITLE: &str = " Create a Print Job ";
pub const QUEUE_TITLE: &str = " Print Queue ";
pub const KEY_HELP: &str =
    "Tab/Shift+Tab move | Enter send | Ctrl+T status | Ctrl+U clear | Esc dismiss | Ctrl+Q quit";

pub fn title() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn alert() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn notice() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn border_focused() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn header() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}
