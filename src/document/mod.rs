//! Text document model.
//!
//! A [`TextDocument`] is an ordered list of [`TextLine`]s plus the single
//! edit cursor. Every operation here is total: out-of-range locations are
//! clamped, never rejected.

mod line;
mod types;

use std::io::{self, Write};

pub use line::TextLine;
pub use types::{
    Cell, CellLocation, DisplayUnit, DocumentLocation, StyleTag, TAB_MARKER, TAB_SIZE,
    WHITESPACE_MARKER,
};

/// Document text and cursor.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<TextLine>,
    cursor: DocumentLocation,
    dirty: bool,
}

impl TextDocument {
    /// Create an empty document (no lines, cursor at the end location).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from lines of text.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc = Self::new();
        doc.load(lines);
        doc
    }

    /// Replace the whole document with `lines`.
    ///
    /// Trailing line terminators are stripped from each line. The cursor
    /// returns to the origin and the document is marked clean.
    pub fn load<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lines = lines
            .into_iter()
            .map(|line| TextLine::new(line.as_ref().trim_end_matches(['\n', '\r'])))
            .collect();
        self.cursor = self.clamp(DocumentLocation::default());
        self.dirty = false;
    }

    /// Write every line followed by a single `\n`.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the sink.
    pub fn store<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for line in &self.lines {
            sink.write_all(line.text().as_bytes())?;
            sink.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Number of lines in the document.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn line(&self, idx: usize) -> Option<&TextLine> {
        self.lines.get(idx)
    }

    /// Document extent in rows (the line count).
    pub fn max_row(&self) -> usize {
        self.lines.len()
    }

    /// Document extent in columns (widest rendered line).
    pub fn max_col(&self) -> usize {
        self.lines.iter().map(TextLine::width).max().unwrap_or(0)
    }

    /// Whether the document has been modified since load or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document as clean (e.g. after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Full text as it would be stored.
    pub fn text(&self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line.text());
            out.push('\n');
            out
        })
    }

    // --- Cursor queries ---

    pub const fn cursor(&self) -> DocumentLocation {
        self.cursor
    }

    /// Display cell of the cursor.
    pub fn cursor_cell(&self) -> CellLocation {
        self.location_to_cell(self.cursor)
    }

    /// Display cell of an arbitrary (clamped) location.
    pub fn location_to_cell(&self, location: DocumentLocation) -> CellLocation {
        let location = self.clamp(location);
        match self.lines.get(location.line) {
            Some(line) => CellLocation::new(location.line, line.char_to_cell(location.char)),
            None => CellLocation::new(self.line_count(), 0),
        }
    }

    /// Nearest document location for a display cell.
    ///
    /// Rows past the end resolve to the end location; columns past a line's
    /// width resolve to its end; columns inside a wide glyph resolve to the
    /// glyph.
    pub fn cell_to_cursor(&self, cell: CellLocation) -> DocumentLocation {
        match self.lines.get(cell.row) {
            Some(line) => DocumentLocation::new(cell.row, line.cell_to_char(cell.col)),
            None => DocumentLocation::new(self.line_count(), 0),
        }
    }

    // --- Cursor motion ---

    /// Move the cursor to `location`, clamping row then column.
    ///
    /// A column just before a zero-width mark moves past the mark.
    pub fn move_cursor(&mut self, location: DocumentLocation) {
        self.cursor = self.clamp(location);
    }

    /// Advance one character, wrapping onto the next line.
    ///
    /// Zero-width marks after the character are stepped over with it.
    pub fn move_forward(&mut self) {
        let DocumentLocation { line, char } = self.cursor;
        let Some(current) = self.lines.get(line) else {
            return;
        };
        if char < current.char_count() {
            self.move_cursor(DocumentLocation::new(line, char + 1));
        } else {
            self.move_cursor(DocumentLocation::new(line + 1, 0));
        }
    }

    /// Step back one character, wrapping onto the end of the previous line.
    ///
    /// Zero-width marks are stepped over together with their base character.
    pub fn move_backward(&mut self) {
        let DocumentLocation { line, char } = self.cursor;
        let previous_stop = self.lines.get(line).and_then(|current| {
            (0..char.min(current.char_count()))
                .rev()
                .find(|&idx| current.is_cursor_stop(idx))
        });
        if let Some(idx) = previous_stop {
            self.cursor = DocumentLocation::new(line, idx);
        } else if line > 0 {
            let previous_len = self.lines[line - 1].char_count();
            self.move_cursor(DocumentLocation::new(line - 1, previous_len));
        }
    }

    /// Move to column 0 of the current line.
    pub fn move_home(&mut self) {
        self.move_cursor(DocumentLocation::new(self.cursor.line, 0));
    }

    /// Move to the end of the current line.
    pub fn move_end(&mut self) {
        let line = self.cursor.line;
        if let Some(current) = self.lines.get(line) {
            self.cursor = DocumentLocation::new(line, current.char_count());
        }
    }

    // --- Editing ---

    /// Insert `ch` at the cursor without moving the cursor.
    ///
    /// Line terminators split the line instead. At the end location a new
    /// line holding `ch` is appended.
    pub fn insert_character(&mut self, ch: char) {
        if matches!(ch, '\n' | '\r') {
            self.insert_newline();
            return;
        }
        let DocumentLocation { line, char } = self.cursor;
        match self.lines.get_mut(line) {
            Some(current) => current.insert_char(char, ch),
            None => self.lines.push(TextLine::new(ch.to_string())),
        }
        self.dirty = true;
    }

    /// Split the current line at the cursor. At the end location an empty
    /// line is appended.
    pub fn insert_newline(&mut self) {
        let DocumentLocation { line, char } = self.cursor;
        match self.lines.get_mut(line) {
            Some(current) => {
                let tail = current.split_off(char);
                self.lines.insert(line + 1, tail);
            }
            None => self.lines.push(TextLine::default()),
        }
        self.dirty = true;
    }

    /// Forward delete at the cursor.
    ///
    /// At a line end the next line is joined onto the current one. No-op
    /// at the end location or at the end of the last line.
    pub fn delete_character(&mut self) {
        let DocumentLocation { line, char } = self.cursor;
        let Some(current) = self.lines.get(line) else {
            return;
        };
        if char < current.char_count() {
            self.lines[line].remove_char(char);
        } else if line + 1 < self.lines.len() {
            let next = self.lines.remove(line + 1);
            self.lines[line].append(&next);
        } else {
            return;
        }
        self.dirty = true;
    }

    fn clamp(&self, location: DocumentLocation) -> DocumentLocation {
        let line = location.line.min(self.lines.len());
        let char = self
            .lines
            .get(line)
            .map_or(0, |current| {
                current.next_cursor_stop(location.char.min(current.char_count()))
            });
        DocumentLocation::new(line, char)
    }
}

impl std::fmt::Debug for TextDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextDocument")
            .field("lines", &format_args!("{} lines", self.lines.len()))
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}
