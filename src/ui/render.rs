use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::app::Model;
use crate::highlight::Highlighter;

use super::rows::{FILL_GLYPH, ScrollbarParams, compose_row};
use super::style::Theme;
use super::{status, text_area};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame, highlighter: &dyn Highlighter, theme: &Theme) {
    let area = frame.area();
    // Everything but the last row is window; the last row is the status bar.
    let window_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    let text = text_area(area);

    frame.render_widget(Clear, area);
    render_window(model, frame, window_area, theme);
    render_text(model, frame, text, highlighter, theme);
    render_scrollbars(model, frame, window_area, text, theme);
    status::render_status_bar(model, frame, status_area, theme);
    place_cursor(model, frame, text);
}

fn render_window(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Line::from(format!(" {} ", model.title())).centered();
    let window = Block::bordered()
        .border_type(BorderType::Double)
        .border_style(theme.border)
        .style(theme.text)
        .title(title);
    frame.render_widget(window, area);
}

fn render_text(
    model: &Model,
    frame: &mut Frame,
    area: Rect,
    highlighter: &dyn Highlighter,
    theme: &Theme,
) {
    let _scope = crate::perf::scope("frame.compose_rows");
    let scroll = model.viewport.scroll();
    let width = usize::from(area.width);

    // Rows past the last line are filled by `compose_row(None, ..)`.
    let content: Vec<Line> = model
        .viewport
        .visible_rows(model.document.line_count())
        .map(|row| model.document.line(row).map(|line| (row, line)))
        .chain(std::iter::repeat(None))
        .take(usize::from(area.height))
        .map(|entry| {
            let styles = entry
                .map(|(row, line)| highlighter.highlight(row, line.text()))
                .unwrap_or_default();
            let line = entry.map(|(_, line)| line);
            let spans: Vec<Span> = compose_row(line, &styles, scroll.col, width)
                .into_iter()
                .map(|run| Span::styled(run.text, theme.style_for_tag(run.style)))
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(content).style(theme.text), area);
}

fn render_scrollbars(model: &Model, frame: &mut Frame, window: Rect, text: Rect, theme: &Theme) {
    let scroll = model.viewport.scroll();
    // The cursor may sit one row past the last line and one column past
    // the widest one, so both extents include that extra cell.
    let vertical = ScrollbarParams::new(
        scroll.row,
        usize::from(text.height),
        model.document.max_row() + 1,
    );
    let horizontal = ScrollbarParams::new(
        scroll.col,
        usize::from(text.width),
        model.document.max_col() + 1,
    );
    let buf = frame.buffer_mut();

    if text.height > 0 && vertical.is_needed() {
        let x = window.right().saturating_sub(1);
        let thumb = vertical.thumb(usize::from(text.height));
        for (idx, y) in (text.top()..text.bottom()).enumerate() {
            paint_track(buf, (x, y), thumb.contains(&idx), theme);
        }
    }
    if text.width > 0 && horizontal.is_needed() {
        let y = window.bottom().saturating_sub(1);
        let thumb = horizontal.thumb(usize::from(text.width));
        for (idx, x) in (text.left()..text.right()).enumerate() {
            paint_track(buf, (x, y), thumb.contains(&idx), theme);
        }
    }
}

fn paint_track(buf: &mut Buffer, position: (u16, u16), thumb: bool, theme: &Theme) {
    let Some(cell) = buf.cell_mut(position) else {
        return;
    };
    if thumb {
        cell.set_symbol(" ").set_style(theme.scrollbar);
    } else {
        cell.set_symbol(FILL_GLYPH).set_style(theme.border);
    }
}

/// Show the terminal cursor on the cursor cell, or hide it when that cell is
/// scrolled out of the text area.
fn place_cursor(model: &Model, frame: &mut Frame, area: Rect) {
    let cursor = model.document.cursor_cell();
    if !model.viewport.contains(cursor) {
        return;
    }
    let scroll = model.viewport.scroll();
    let (Ok(dx), Ok(dy)) = (
        u16::try_from(cursor.col - scroll.col),
        u16::try_from(cursor.row - scroll.row),
    ) else {
        return;
    };
    if dx < area.width && dy < area.height {
        frame.set_cursor_position(Position::new(area.x + dx, area.y + dy));
    }
}
