use super::rows::FILL_GLYPH;
use super::style::Theme;
use super::*;
use crate::app::{Message, Model, ToastLevel, update};
use crate::document::{StyleTag, TAB_MARKER, TextDocument};
use crate::highlight::PlainHighlighter;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use std::path::PathBuf;

const COLS: u16 = 80;
const ROWS: u16 = 10;

fn create_model(lines: &[&str]) -> Model {
    Model::new(
        TextDocument::from_lines(lines.iter().copied()),
        Some(PathBuf::from("notes.txt")),
        (COLS, ROWS),
    )
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(COLS, ROWS)).unwrap();
    terminal
        .draw(|frame| render(model, frame, &PlainHighlighter, &Theme::default()))
        .unwrap();
    terminal
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

#[test]
fn test_window_frame_and_title() {
    let terminal = draw(&create_model(&["hello"]));
    let buffer = terminal.backend().buffer();

    let top = row_text(buffer, 0);
    assert!(top.starts_with('╔'), "top row: {top}");
    assert!(top.ends_with('╗'));
    assert!(top.contains(" notes.txt "));
    assert!(row_text(buffer, ROWS - 2).starts_with('╚'));
}

#[test]
fn test_untitled_document_title() {
    let model = Model::new(TextDocument::new(), None, (COLS, ROWS));
    let terminal = draw(&model);
    assert!(row_text(terminal.backend().buffer(), 0).contains(" Untitled "));
}

#[test]
fn test_text_starts_inside_frame() {
    let terminal = draw(&create_model(&["hello", "world"]));
    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 1).starts_with("║hello "));
    assert!(row_text(buffer, 2).starts_with("║world "));
}

#[test]
fn test_rows_past_end_are_filled() {
    let terminal = draw(&create_model(&["only"]));
    let buffer = terminal.backend().buffer();
    // Screen row 2 is document row 1, past the last line.
    for x in 1..COLS - 1 {
        assert_eq!(buffer[(x, 2)].symbol(), FILL_GLYPH, "column {x}");
    }
}

#[test]
fn test_tab_renders_marker_then_padding() {
    let terminal = draw(&create_model(&["\tx"]));
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(1, 1)].symbol(), TAB_MARKER);
    assert_eq!(buffer[(2, 1)].symbol(), " ");
    assert_eq!(buffer[(9, 1)].symbol(), "x");
}

#[test]
fn test_no_scrollbars_for_short_document() {
    let terminal = draw(&create_model(&["short"]));
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(COLS - 1, 1)].symbol(), "║");
    assert_eq!(buffer[(1, ROWS - 2)].symbol(), "═");
}

#[test]
fn test_vertical_scrollbar_for_long_document() {
    let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
    let model = Model::new(
        TextDocument::from_lines(&lines),
        Some(PathBuf::from("notes.txt")),
        (COLS, ROWS),
    );
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();

    // Thumb at the top of the track, track below it.
    assert_eq!(buffer[(COLS - 1, 1)].symbol(), " ");
    assert_eq!(buffer[(COLS - 1, 1)].style().bg, Theme::default().scrollbar.bg);
    assert_eq!(buffer[(COLS - 1, 7)].symbol(), FILL_GLYPH);
}

#[test]
fn test_vertical_thumb_moves_with_scroll() {
    let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
    let mut model = Model::new(
        TextDocument::from_lines(&lines),
        Some(PathBuf::from("notes.txt")),
        (COLS, ROWS),
    );
    for _ in 0..60 {
        model = update(model, Message::MoveDown);
    }
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(COLS - 1, 1)].symbol(), FILL_GLYPH);
    assert_eq!(buffer[(COLS - 1, 7)].symbol(), " ");
}

#[test]
fn test_horizontal_scrollbar_for_wide_line() {
    let long = "x".repeat(200);
    let terminal = draw(&create_model(&[long.as_str()]));
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(1, ROWS - 2)].symbol(), " ");
    assert_eq!(buffer[(70, ROWS - 2)].symbol(), FILL_GLYPH);
}

#[test]
fn test_status_bar_key_hints() {
    let terminal = draw(&create_model(&["hello"]));
    let buffer = terminal.backend().buffer();
    let status = row_text(buffer, ROWS - 1);
    assert!(status.starts_with(" Ctrl-Q Quit Ctrl-S Save"), "status: {status}");
    assert!(status.ends_with("Ln 1, Col 1 "));
    assert_eq!(buffer[(1, ROWS - 1)].style().fg, Theme::default().status_key.fg);
}

#[test]
fn test_status_bar_shows_modified_and_position() {
    let mut model = create_model(&["hello"]);
    model = update(model, Message::MoveEnd);
    model = update(model, Message::InsertChar('!'));
    let terminal = draw(&model);
    let status = row_text(terminal.backend().buffer(), ROWS - 1);
    assert!(status.ends_with("[modified] Ln 1, Col 7 "), "status: {status}");
}

#[test]
fn test_status_bar_shows_toast() {
    let mut model = create_model(&["hello"]);
    model.show_toast(ToastLevel::Error, "Save failed: disk full");
    let terminal = draw(&model);
    let status = row_text(terminal.backend().buffer(), ROWS - 1);
    assert!(status.contains("[error] Save failed: disk full"));
    assert!(!status.contains("Ctrl-Q"));
}

#[test]
fn test_cursor_placed_in_text_area() {
    let mut model = create_model(&["hello", "world"]);
    model = update(model, Message::MoveDown);
    model = update(model, Message::MoveRight);
    model = update(model, Message::MoveRight);
    let mut terminal = draw(&model);
    assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3, 2));
}

#[test]
fn test_cursor_follows_horizontal_scroll() {
    let long = "y".repeat(100);
    let mut model = create_model(&[long.as_str()]);
    model = update(model, Message::MoveEnd);
    let mut terminal = draw(&model);
    let scroll = model.viewport.scroll();
    assert_eq!(scroll.col, 100 + 1 - 78);
    assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(78, 1));
    assert_eq!(row_text(terminal.backend().buffer(), 1).chars().nth(1), Some('y'));
}

#[test]
fn test_highlighter_styles_are_applied() {
    let model = create_model(&["let x"]);
    let theme = Theme::default();
    let highlighter =
        |_row: usize, text: &str| vec![StyleTag::Syntax(1); text.chars().count().min(3)];
    let mut terminal = Terminal::new(TestBackend::new(COLS, ROWS)).unwrap();
    terminal
        .draw(|frame| render(&model, frame, &highlighter, &theme))
        .unwrap();
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(1, 1)].style().fg, Some(theme.syntax[1]));
    assert_eq!(buffer[(5, 1)].style().fg, theme.text.fg);
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let model = Model::new(TextDocument::from_lines(["abc"]), None, (3, 2));
    let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
    terminal
        .draw(|frame| render(&model, frame, &PlainHighlighter, &Theme::default()))
        .unwrap();
}

#[test]
fn test_text_area_excludes_chrome() {
    let area = text_area(ratatui::layout::Rect::new(0, 0, COLS, ROWS));
    assert_eq!(area, ratatui::layout::Rect::new(1, 1, COLS - 2, ROWS - 3));
    assert_eq!(text_area_size(1, 1), (0, 0));
}
