use ratatui::{
    layout::{Constraint, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use printq_core::{AppViewModel, FormField, FormView, JobTableView, NO_JOBS};

use super::constants::*;
use super::layout;

pub fn render(frame: &mut Frame, view: &AppViewModel, last_sync: Option<&str>) {
    let alerts = alert_lines(view);
    let screen = layout::screen(frame.area(), alerts.len() as u16);

    frame.render_widget(Paragraph::new(Span::styled(TITLE, title())), screen.title);
    frame.render_widget(Paragraph::new(alerts), screen.alerts);
    render_form(frame, screen.form, &view.form);
    render_queue(frame, screen.queue, &view.table);
    frame.render_widget(
        Paragraph::new(status_text(view, last_sync)),
        screen.status,
    );
    frame.render_widget(Paragraph::new(Span::styled(KEY_HELP, dim())), screen.help);
}

/// Load banner first (only while not loaded), then the submit error.
fn alert_lines(view: &AppViewModel) -> Vec<Line<'static>> {
    view.banner
        .iter()
        .chain(view.submit_error.iter())
        .map(|text| Line::from(Span::styled(text.clone(), alert())))
        .collect()
}

fn status_text(view: &AppViewModel, last_sync: Option<&str>) -> String {
    let mut text = format!("Jobs: {}", view.job_count);
    if view.pending_submissions > 0 {
        text.push_str(&format!(" | Sending: {}", view.pending_submissions));
    }
    if let Some(at) = last_sync {
        text.push_str(&format!(" | Last update: {at}"));
    }
    text
}

fn render_form(frame: &mut Frame, area: Rect, form: &FormView) {
    let block = Block::default()
        .title(FORM_TITLE)
        .borders(Borders::ALL)
        .border_style(border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (rows, notice_row) = layout::form_rows(inner);
    for (field, row) in FormField::ALL.into_iter().zip(rows) {
        let focused = form.focus == field;
        let input = Block::default()
            .title(format!(" {} ", field.label()))
            .borders(Borders::ALL)
            .border_style(if focused { border_focused() } else { border() });
        let input_inner = input.inner(row);
        let value = form.value(field);
        frame.render_widget(Paragraph::new(value.to_string()).block(input), row);

        if focused {
            let offset = (value.chars().count() as u16).min(input_inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(input_inner.x + offset, input_inner.y));
        }
    }

    if let Some(text) = &form.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(text.clone(), notice())),
            notice_row,
        );
    }
}

fn render_queue(frame: &mut Frame, area: Rect, table: &JobTableView) {
    let block = Block::default()
        .title(QUEUE_TITLE)
        .borders(Borders::ALL)
        .border_style(border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match table {
        JobTableView::Empty => frame.render_widget(Paragraph::new(NO_JOBS), inner),
        JobTableView::Populated {
            caption,
            headers,
            rows,
            ..
        } => {
            let (caption_row, body) = layout::queue_rows(inner);
            frame.render_widget(Paragraph::new(caption.clone()), caption_row);

            let header_row = Row::new(headers.iter().map(|label| Cell::from(label.clone())))
                .style(header());
            let body_rows = rows
                .iter()
                .map(|row| Row::new(row.cells.iter().map(|cell| Cell::from(cell.clone()))));
            let widths = vec![Constraint::Fill(1); headers.len()];
            frame.render_widget(Table::new(body_rows, widths).header(header_row), body);
        }
    }
}
