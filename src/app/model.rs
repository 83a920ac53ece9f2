use std::path::PathBuf;

use crate::document::TextDocument;
use crate::ui::text_area_size;
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    id: u64,
    level: ToastLevel,
    message: String,
}

/// The complete editor state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The text being edited
    pub document: TextDocument,
    /// Scroll position and desired column
    pub viewport: Viewport,
    /// File the document is saved to; `None` until one is given
    pub file_path: Option<PathBuf>,
    /// Terminal size as (cols, rows)
    pub terminal_size: (u16, u16),
    toast: Option<Toast>,
    next_toast_id: u64,
    /// Whether the session should end
    pub should_quit: bool,
    /// Set after the unsaved-changes warning; the next quit goes through
    pub quit_confirmed: bool,
}

impl Model {
    pub fn new(document: TextDocument, file_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        let (width, height) = text_area_size(terminal_size.0, terminal_size.1);
        Self {
            document,
            viewport: Viewport::new(width, height),
            file_path,
            terminal_size,
            toast: None,
            next_toast_id: 0,
            should_quit: false,
            quit_confirmed: false,
        }
    }

    /// Window title: the file path, or `Untitled`.
    pub fn title(&self) -> String {
        self.file_path
            .as_deref()
            .map_or_else(|| "Untitled".to_string(), |p| p.display().to_string())
    }

    pub(crate) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.next_toast_id += 1;
        self.toast = Some(Toast {
            id: self.next_toast_id,
            level,
            message: message.into(),
        });
    }

    /// Clear the toast if it is still the one identified by `id`.
    pub(crate) fn expire_toast(&mut self, id: u64) -> bool {
        if self.toast.as_ref().is_some_and(|toast| toast.id == id) {
            self.toast = None;
            return true;
        }
        false
    }

    pub(crate) fn toast_id(&self) -> Option<u64> {
        self.toast.as_ref().map(|toast| toast.id)
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(TextDocument::new(), None, (80, 24))
    }
}
