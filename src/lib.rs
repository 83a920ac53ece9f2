// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. file::FileError)
    clippy::module_name_repetitions
)]

//! # red
//!
//! A small full-screen terminal text editor.
//!
//! red edits one file at a time in a framed window with:
//! - Tab stops and double-width glyphs laid out cell by cell
//! - A cursor that keeps its column across short lines
//! - Scrollbars, a status bar and transient messages
//! - All-or-nothing saves
//!
//! ## Architecture
//!
//! red uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! A single-threaded [`scheduler`] multiplexes terminal input with timers
//! and coalesces redraw requests.
//!
//! ## Modules
//!
//! - [`app`]: Editor state, key bindings and the session loop
//! - [`document`]: Lines, cursor and character/cell mapping
//! - [`ui`]: Viewport, row composition and rendering
//! - [`scheduler`]: Timers, input multiplexing and redraw coalescing
//! - [`input`]: Terminal key and resize events
//! - [`highlight`]: Per-character style tags
//! - [`file`]: Reading and atomically saving files

pub mod app;
pub mod config;
pub mod document;
pub mod file;
pub mod highlight;
pub mod input;
pub mod perf;
pub mod scheduler;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::document::{CellLocation, DocumentLocation, TextDocument, TextLine};
    pub use crate::ui::viewport::Viewport;
}
