//! Core types for document and display coordinates.

/// Number of display columns between tab stops.
pub const TAB_SIZE: usize = 8;

/// Glyph drawn in the first cell of an expanded tab.
pub const TAB_MARKER: &str = "\u{203a}";

/// Glyph used for whitespace on lines that contain nothing but whitespace.
pub const WHITESPACE_MARKER: &str = "\u{00b7}";

/// A position in document space.
///
/// `line` is a 0-based line index and `char` a 0-based index into that
/// line's characters. `line == line_count` is the single virtual location
/// after the last line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentLocation {
    pub line: usize,
    pub char: usize,
}

impl DocumentLocation {
    pub const fn new(line: usize, char: usize) -> Self {
        Self { line, char }
    }
}

/// A position in display space: row (= document line) and display column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellLocation {
    pub row: usize,
    pub col: usize,
}

impl CellLocation {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Style classification for a rendered cell.
///
/// The core only assigns the structural tags; a highlighter may replace
/// `Normal` with `Syntax(class)` on a per-character basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Ordinary text.
    #[default]
    Normal,
    /// Visible whitespace (spaces and other non-tab blanks).
    Whitespace,
    /// Cells produced by expanding a tab.
    Tab,
    /// The right half of a wide glyph whose left half was scrolled away.
    Continuation,
    /// Filler for rows past the end of the document.
    Dragons,
    /// Opaque class assigned by a highlighter.
    Syntax(u8),
}

/// What a single display cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUnit {
    /// A renderable grapheme (a base character plus any merged
    /// zero-width marks).
    Glyph(String),
    /// Second column of a double-width glyph. Never a cursor target.
    Continuation,
}

/// One column slot of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub content: DisplayUnit,
    pub style: StyleTag,
}

impl Cell {
    pub fn glyph(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            content: DisplayUnit::Glyph(text.into()),
            style,
        }
    }

    pub const fn continuation() -> Self {
        Self {
            content: DisplayUnit::Continuation,
            style: StyleTag::Normal,
        }
    }

    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, DisplayUnit::Continuation)
    }

    /// The glyph text, or `None` for a continuation cell.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            DisplayUnit::Glyph(s) => Some(s),
            DisplayUnit::Continuation => None,
        }
    }
}
