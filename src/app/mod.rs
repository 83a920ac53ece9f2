//! Editor state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Scheduler-driven event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use input::message_for_key;
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::highlight::{Highlighter, PlainHighlighter};
use crate::ui::style::{Palette, Theme};

/// Main application struct that owns the editing session setup.
pub struct App {
    file_path: Option<PathBuf>,
    theme: Theme,
    highlighter: Box<dyn Highlighter>,
}

impl App {
    /// Create an editor for `file_path`, or an unnamed buffer.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            theme: Theme::default(),
            highlighter: Box::new(PlainHighlighter),
        }
    }

    /// Pick the color table to draw with.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.theme = Theme::for_palette(palette);
        self
    }

    /// Replace the highlighter consulted on every redraw.
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }
}
