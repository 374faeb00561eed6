use ratatui::layout::{Constraint, Layout, Rect};

/// Bordered form: three bordered inputs plus a notice line.
pub const FORM_HEIGHT: u16 = 3 * FIELD_HEIGHT + 1 + 2;
const FIELD_HEIGHT: u16 = 3;

pub struct Screen {
    pub title: Rect,
    pub alerts: Rect,
    pub form: Rect,
    pub queue: Rect,
    pub status: Rect,
    pub help: Rect,
}

pub fn screen(area: Rect, alert_lines: u16) -> Screen {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(alert_lines),
        Constraint::Length(FORM_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    Screen {
        title: chunks[0],
        alerts: chunks[1],
        form: chunks[2],
        queue: chunks[3],
        status: chunks[4],
        help: chunks[5],
    }
}

/// Input rows for status, name and message, then the notice row.
pub fn form_rows(inner: Rect) -> ([Rect; 3], Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
    ])
    .split(inner);
    ([chunks[0], chunks[1], chunks[2]], chunks[3])
}

/// Caption row above the table body.
pub fn queue_rows(inner: Rect) -> (Rect, Rect) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);
    (chunks[0], chunks[1])
}
