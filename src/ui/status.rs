use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style::Theme;

/// Key hints on the left (or the active toast), cursor position on the right.
pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let left = match model.active_toast() {
        Some((message, level)) => toast_line(message, level, theme),
        None => Line::from(vec![
            Span::styled(" ", theme.status),
            Span::styled("Ctrl-Q", theme.status_key),
            Span::styled(" Quit ", theme.status),
            Span::styled("Ctrl-S", theme.status_key),
            Span::styled(" Save", theme.status),
        ]),
    };
    let position = position_text(model);
    // Drop the position rather than draw it over the hints.
    let fits = left.width() + position.len() < usize::from(area.width);

    frame.render_widget(Paragraph::new(left).style(theme.status), area);
    if fits {
        frame.render_widget(Line::styled(position, theme.status).right_aligned(), area);
    }
}

fn toast_line<'a>(message: &'a str, level: ToastLevel, theme: &Theme) -> Line<'a> {
    let (prefix, style) = match level {
        ToastLevel::Info => (" ", theme.toast),
        ToastLevel::Warning => (" [warn] ", theme.toast.patch(theme.status_key)),
        ToastLevel::Error => (" [error] ", theme.toast.patch(theme.status_key)),
    };
    Line::from(vec![Span::styled(prefix, style), Span::styled(message, style)])
}

fn position_text(model: &Model) -> String {
    let cell = model.document.cursor_cell();
    let modified = if model.document.is_dirty() {
        "[modified] "
    } else {
        ""
    };
    format!("{modified}Ln {}, Col {} ", cell.row + 1, cell.col + 1)
}
