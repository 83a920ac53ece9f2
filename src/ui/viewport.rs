//! Viewport management for scrolling.
//!
//! The [`Viewport`] tracks the visible text area, the top-left scroll cell
//! and the column the user wants to keep across vertical motion.

use std::ops::Range;

use crate::document::CellLocation;

/// Manages the visible portion of a document.
///
/// # Example
///
/// ```
/// use red::document::CellLocation;
/// use red::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(10, 5);
/// vp.ensure_visible(CellLocation::new(7, 12), 100, 40);
/// assert_eq!(vp.scroll(), CellLocation::new(3, 3));
/// assert_eq!(vp.visible_rows(100), 3..8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    scroll: CellLocation,
    desired_col: usize,
}

impl Viewport {
    /// Create a viewport for a text area of `width` x `height` cells.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            scroll: CellLocation::new(0, 0),
            desired_col: 0,
        }
    }

    /// Top-left visible cell.
    pub const fn scroll(&self) -> CellLocation {
        self.scroll
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Column kept across vertical motion.
    pub const fn desired_col(&self) -> usize {
        self.desired_col
    }

    pub const fn set_desired_col(&mut self, col: usize) {
        self.desired_col = col;
    }

    /// Resize the text area. Scroll is left alone until the next
    /// [`ensure_visible`](Self::ensure_visible).
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Adjust scroll minimally so `cursor` lies inside the text area.
    ///
    /// Each axis is handled independently and then clamped so the view
    /// never starts past `doc_extent - extent + 1`. A zero extent pins
    /// that axis to 0.
    pub fn ensure_visible(&mut self, cursor: CellLocation, doc_rows: usize, doc_cols: usize) {
        self.scroll = CellLocation::new(
            fit_axis(self.scroll.row, cursor.row, usize::from(self.height), doc_rows),
            fit_axis(self.scroll.col, cursor.col, usize::from(self.width), doc_cols),
        );
    }

    /// Put `row` at the top of the text area.
    pub const fn pin_row_to_top(&mut self, row: usize) {
        self.scroll.row = row;
    }

    /// Put `row` at the bottom of the text area.
    pub const fn pin_row_to_bottom(&mut self, row: usize) {
        self.scroll.row = (row + 1).saturating_sub(self.height as usize);
    }

    /// Document rows currently on screen, clamped to `doc_rows`.
    pub fn visible_rows(&self, doc_rows: usize) -> Range<usize> {
        let start = self.scroll.row.min(doc_rows);
        let end = (self.scroll.row + usize::from(self.height)).min(doc_rows);
        start..end
    }

    /// Whether `cell` falls inside the text area.
    pub fn contains(&self, cell: CellLocation) -> bool {
        cell.row >= self.scroll.row
            && cell.row < self.scroll.row + usize::from(self.height)
            && cell.col >= self.scroll.col
            && cell.col < self.scroll.col + usize::from(self.width)
    }
}

fn fit_axis(scroll: usize, cursor: usize, extent: usize, doc_extent: usize) -> usize {
    if extent == 0 {
        return 0;
    }
    let scroll = if cursor < scroll {
        cursor
    } else if cursor >= scroll + extent {
        cursor + 1 - extent
    } else {
        scroll
    };
    scroll.min((doc_extent + 1).saturating_sub(extent))
}
