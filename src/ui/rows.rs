//! Styled-run composition for visible rows.
//!
//! The renderer never looks at [`Cell`](crate::document::Cell)s directly.
//! Each visible row is turned into a short list of [`StyledRun`]s that are
//! already clipped to the text area, in left-to-right order, with adjacent
//! runs of the same style merged.

use std::ops::Range;

use crate::document::{StyleTag, TextLine};

/// Glyph filling rows past the end of the document and scrollbar tracks.
pub const FILL_GLYPH: &str = "\u{2591}";

/// Shown in place of a wide glyph's right half whose left half is scrolled
/// out of view.
pub const ORPHAN_MARKER: &str = "<";

/// A contiguous piece of text drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: StyleTag,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Compose the runs for one text-area row.
///
/// `line` is `None` for rows past the end of the document. `styles` holds
/// the highlighter's per-character tags; characters without one keep the
/// line's own styling, and only `Normal` cells are ever restyled.
pub fn compose_row(
    line: Option<&TextLine>,
    styles: &[StyleTag],
    scroll_col: usize,
    width: usize,
) -> Vec<StyledRun> {
    let Some(line) = line else {
        if width == 0 {
            return Vec::new();
        }
        return vec![StyledRun::new(FILL_GLYPH.repeat(width), StyleTag::Dragons)];
    };

    let cells = line.cells();
    let end = scroll_col.saturating_add(width).min(cells.len());
    if scroll_col >= end {
        return Vec::new();
    }
    let cell_styles = highlighted_cell_styles(line, styles);

    let mut runs: Vec<StyledRun> = Vec::new();
    for col in scroll_col..end {
        let cell = &cells[col];
        let (text, style) = match cell.text() {
            Some(_) if col + 1 == scroll_col + width && next_is_continuation(line, col) => {
                (" ", cell_styles[col])
            }
            Some(glyph) => (glyph, cell_styles[col]),
            None if col == scroll_col => (ORPHAN_MARKER, StyleTag::Continuation),
            None => continue,
        };
        push_run(&mut runs, text, style);
    }
    runs
}

fn next_is_continuation(line: &TextLine, col: usize) -> bool {
    line.cells().get(col + 1).is_some_and(|c| c.is_continuation())
}

fn highlighted_cell_styles(line: &TextLine, styles: &[StyleTag]) -> Vec<StyleTag> {
    let mut out: Vec<StyleTag> = line.cells().iter().map(|cell| cell.style).collect();
    for (idx, range) in line.char_cell_ranges() {
        let Some(tag) = styles.get(idx).copied() else {
            break;
        };
        for style in &mut out[range] {
            if *style == StyleTag::Normal {
                *style = tag;
            }
        }
    }
    out
}

fn push_run(runs: &mut Vec<StyledRun>, text: &str, style: StyleTag) {
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(StyledRun::new(text, style)),
    }
}

/// Scroll position along one axis, as handed to a scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarParams {
    pub offset: usize,
    pub page_size: usize,
    pub total: usize,
}

impl ScrollbarParams {
    pub const fn new(offset: usize, page_size: usize, total: usize) -> Self {
        Self {
            offset,
            page_size,
            total,
        }
    }

    /// A scrollbar is only worth drawing when the page doesn't cover the
    /// whole extent.
    pub const fn is_needed(&self) -> bool {
        self.page_size < self.total
    }

    /// Track positions covered by the thumb on a track of `extent` cells.
    ///
    /// The thumb is at least one cell long and never runs off the end of
    /// the track.
    pub fn thumb(&self, extent: usize) -> Range<usize> {
        if extent == 0 || self.total == 0 {
            return 0..0;
        }
        let total = self.total;
        let offset = self.offset.min(total);
        let page = self.page_size.min(total);

        let thumb_len = (page * extent).div_ceil(total).max(1);
        let start = (offset * extent).div_ceil(total).min(extent - thumb_len);
        start..start + thumb_len
    }
}
