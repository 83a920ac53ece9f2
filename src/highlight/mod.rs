//! Per-character style tags for display rows.
//!
//! A [`Highlighter`] is asked for one line at a time during a redraw and
//! keeps no state between redraws as far as the editor is concerned.
//! Characters it doesn't cover are drawn with [`StyleTag::Normal`].

use crate::document::StyleTag;

pub trait Highlighter {
    /// Tags for the characters of `text` (document line `row`), in order.
    ///
    /// The result may be shorter than the line; missing entries default to
    /// [`StyleTag::Normal`].
    fn highlight(&self, row: usize, text: &str) -> Vec<StyleTag>;
}

/// Highlighter that leaves every character unstyled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _row: usize, _text: &str) -> Vec<StyleTag> {
        Vec::new()
    }
}

impl<F> Highlighter for F
where
    F: Fn(usize, &str) -> Vec<StyleTag>,
{
    fn highlight(&self, row: usize, text: &str) -> Vec<StyleTag> {
        self(row, text)
    }
}
