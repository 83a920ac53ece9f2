//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and desired column
//! - [`rows`]: Styled runs and scrollbar geometry for visible rows
//! - [`style`]: Theming and colors
//!
//! Screen layout: a double-line window frame fills every row but the last,
//! which holds the status bar. The text area sits inside the frame, so it
//! is [`RESERVED_COLS`] narrower and [`RESERVED_ROWS`] shorter than the
//! terminal.

pub mod rows;
pub mod style;
pub mod viewport;

mod render;
mod status;

use ratatui::layout::Rect;

pub use render::render;

/// Terminal rows not available to text: top and bottom frame edges plus the
/// status bar.
pub const RESERVED_ROWS: u16 = 3;

/// Terminal columns not available to text: left and right frame edges.
pub const RESERVED_COLS: u16 = 2;

/// Size `(width, height)` of the text area for a terminal of the given size.
pub const fn text_area_size(cols: u16, rows: u16) -> (u16, u16) {
    (
        cols.saturating_sub(RESERVED_COLS),
        rows.saturating_sub(RESERVED_ROWS),
    )
}

/// Text area inside the window frame for a full-screen `area`.
pub fn text_area(area: Rect) -> Rect {
    let (width, height) = text_area_size(area.width, area.height);
    Rect::new(area.x + 1, area.y + 1, width, height)
}

#[cfg(test)]
mod tests;
