//! A single line of text with its cached display rendering.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use super::types::{Cell, DisplayUnit, StyleTag, TAB_MARKER, TAB_SIZE, WHITESPACE_MARKER};

/// One line of document text.
///
/// The rendered `cells` and per-character `column_widths` are derived from
/// `text` on every mutation, so they are never stale when read.
///
/// Invariants:
/// - `column_widths.len()` equals the number of characters in `text`
/// - `cells.len()` equals the sum of `column_widths`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
    text: String,
    cells: Vec<Cell>,
    column_widths: Vec<u8>,
}

impl TextLine {
    /// Create a line from text and render it.
    pub fn new(text: impl Into<String>) -> Self {
        let mut line = Self {
            text: text.into(),
            cells: Vec::new(),
            column_widths: Vec::new(),
        };
        line.render();
        line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and re-derive the rendering.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.render();
    }

    /// Number of characters (Unicode scalar values) in the line.
    pub fn char_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn column_widths(&self) -> &[u8] {
        &self.column_widths
    }

    /// Rendered width of the line in display columns.
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Display column at which character `idx` starts.
    ///
    /// `idx == char_count()` gives the column just past the line end.
    pub fn char_to_cell(&self, idx: usize) -> usize {
        debug_assert!(
            idx <= self.char_count(),
            "char index {idx} out of range for line of {} chars",
            self.char_count()
        );
        let idx = idx.min(self.char_count());
        self.column_widths[..idx].iter().copied().map(usize::from).sum()
    }

    /// Character index owning display column `col`.
    ///
    /// A column inside a wide glyph or an expanded tab resolves to that
    /// character. Columns past the rendered width give `char_count()`.
    pub fn cell_to_char(&self, col: usize) -> usize {
        let mut covered = 0usize;
        for (idx, width) in self.column_widths.iter().enumerate() {
            covered += usize::from(*width);
            if covered > col {
                return idx;
            }
        }
        self.char_count()
    }

    /// Whether the cursor may rest before character `idx`.
    ///
    /// Positions before a zero-width character are not stops, so a glyph is
    /// never split from its trailing marks. The line end is always a stop.
    pub fn is_cursor_stop(&self, idx: usize) -> bool {
        self.column_widths.get(idx).is_none_or(|width| *width > 0)
    }

    /// First cursor stop at or after `idx`, capped at the line end.
    pub fn next_cursor_stop(&self, idx: usize) -> usize {
        (idx..self.char_count())
            .find(|&candidate| self.is_cursor_stop(candidate))
            .unwrap_or_else(|| self.char_count())
    }

    /// Cell ranges occupied by each character, in order.
    ///
    /// Zero-width characters yield an empty range.
    pub fn char_cell_ranges(&self) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        self.column_widths
            .iter()
            .scan(0usize, |start, width| {
                let range = *start..*start + usize::from(*width);
                *start = range.end;
                Some(range)
            })
            .enumerate()
    }

    /// Insert `ch` before character `idx`.
    pub fn insert_char(&mut self, idx: usize, ch: char) {
        let at = self.byte_offset(idx);
        self.text.insert(at, ch);
        self.render();
    }

    /// Remove and return the character at `idx`, if any.
    pub fn remove_char(&mut self, idx: usize) -> Option<char> {
        if idx >= self.char_count() {
            return None;
        }
        let at = self.byte_offset(idx);
        let removed = self.text.remove(at);
        self.render();
        Some(removed)
    }

    /// Split at character `idx`, keeping the head and returning the tail.
    pub fn split_off(&mut self, idx: usize) -> Self {
        let at = self.byte_offset(idx);
        let tail = self.text.split_off(at);
        self.render();
        Self::new(tail)
    }

    /// Append the text of `other` to this line.
    pub fn append(&mut self, other: &Self) {
        self.text.push_str(&other.text);
        self.render();
    }

    fn byte_offset(&self, idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(idx)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn render(&mut self) {
        self.cells.clear();
        self.column_widths.clear();

        // Whitespace-only lines show their blanks so they are easy to spot.
        let blank_fill = if is_whitespace_only(&self.text) {
            WHITESPACE_MARKER
        } else {
            " "
        };

        let mut col = 0usize;
        for ch in self.text.chars() {
            let width = if ch == '\t' {
                TAB_SIZE - col % TAB_SIZE
            } else {
                ch.width().unwrap_or(0)
            };

            if ch == '\t' {
                self.cells.push(Cell::glyph(TAB_MARKER, StyleTag::Tab));
                self.cells.extend(
                    std::iter::repeat_with(|| Cell::glyph(blank_fill, StyleTag::Tab))
                        .take(width - 1),
                );
            } else if width == 0 {
                Self::merge_zero_width(&mut self.cells, ch);
            } else if ch.is_whitespace() {
                self.cells.extend(
                    std::iter::repeat_with(|| Cell::glyph(blank_fill, StyleTag::Whitespace))
                        .take(width),
                );
            } else {
                self.cells
                    .push(Cell::glyph(ch.to_string(), StyleTag::Normal));
                if width == 2 {
                    self.cells.push(Cell::continuation());
                }
            }

            self.column_widths
                .push(u8::try_from(width).unwrap_or(u8::MAX));
            col += width;
        }
    }

    /// Attach a combining mark to the preceding normal glyph. Marks after
    /// whitespace, and control characters, are not displayed.
    fn merge_zero_width(cells: &mut [Cell], ch: char) {
        if ch.is_control() {
            return;
        }
        let previous = cells.iter_mut().rev().find(|cell| !cell.is_continuation());
        if let Some(Cell {
            content: DisplayUnit::Glyph(glyph),
            style: StyleTag::Normal,
        }) = previous
        {
            glyph.push(ch);
        }
    }
}

fn is_whitespace_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}
