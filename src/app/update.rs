use crate::app::{Model, ToastLevel};
use crate::document::{CellLocation, DocumentLocation, TextDocument};
use crate::ui::text_area_size;

/// All possible events and actions in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Vertical motion (keeps the desired column)
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,

    // Horizontal motion
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,

    // Editing
    /// Insert a character and step past it
    InsertChar(char),
    /// Split the line at the cursor and step onto the new line
    InsertNewline,
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character at the cursor
    Delete,

    // File
    /// Write the document to its file
    Save,

    // Window
    /// Terminal resized to (cols, rows)
    Resize(u16, u16),

    // Application
    /// Quit, asking for confirmation if there are unsaved changes
    Quit,
}

/// How a message affects the desired column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    /// Vertical motion: land on the desired column.
    Sticky,
    /// Anything that moves or edits horizontally: remember the new column.
    Reset,
    /// Not a cursor operation.
    Untouched,
}

/// Pure function that updates the model based on a message.
///
/// All state transitions happen here. Saving is the one message whose work
/// happens outside, in the side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save keeps the flag so Ctrl+S followed by Ctrl+Q still quits at once.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    let page = usize::from(model.viewport.height()).max(1);
    let doc = &mut model.document;
    let column = match msg {
        Message::MoveUp => {
            move_lines_up(doc, 1);
            Column::Sticky
        }
        Message::MoveDown => {
            move_lines_down(doc, 1);
            Column::Sticky
        }
        Message::PageUp => {
            move_lines_up(doc, page);
            Column::Sticky
        }
        Message::PageDown => {
            move_lines_down(doc, page);
            Column::Sticky
        }
        Message::MoveLeft => {
            doc.move_backward();
            Column::Reset
        }
        Message::MoveRight => {
            doc.move_forward();
            Column::Reset
        }
        Message::MoveHome => {
            doc.move_home();
            Column::Reset
        }
        Message::MoveEnd => {
            doc.move_end();
            Column::Reset
        }
        Message::InsertChar(ch) => {
            doc.insert_character(ch);
            doc.move_forward();
            Column::Reset
        }
        Message::InsertNewline => {
            doc.insert_newline();
            doc.move_forward();
            Column::Reset
        }
        Message::Backspace => {
            doc.move_backward();
            doc.delete_character();
            Column::Reset
        }
        Message::Delete => {
            doc.delete_character();
            Column::Reset
        }
        Message::Save => Column::Untouched,
        Message::Resize(cols, rows) => {
            model.terminal_size = (cols, rows);
            let (width, height) = text_area_size(cols, rows);
            model.viewport.resize(width, height);
            Column::Untouched
        }
        Message::Quit => {
            if model.document.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
            Column::Untouched
        }
    };

    match column {
        Column::Sticky => {
            let row = model.document.cursor_cell().row;
            let target = CellLocation::new(row, model.viewport.desired_col());
            let location = model.document.cell_to_cursor(target);
            model.document.move_cursor(location);
        }
        Column::Reset => {
            let col = model.document.cursor_cell().col;
            model.viewport.set_desired_col(col);
        }
        Column::Untouched => {}
    }

    // Paging lands the cursor on the far edge of the new page.
    let cursor = model.document.cursor_cell();
    match msg {
        Message::PageDown => model.viewport.pin_row_to_top(cursor.row),
        Message::PageUp => model.viewport.pin_row_to_bottom(cursor.row),
        _ => {}
    }
    model
        .viewport
        .ensure_visible(cursor, model.document.max_row(), model.document.max_col());

    model
}

fn move_lines_up(doc: &mut TextDocument, n: usize) {
    let cursor = doc.cursor();
    doc.move_cursor(DocumentLocation::new(cursor.line.saturating_sub(n), cursor.char));
}

fn move_lines_down(doc: &mut TextDocument, n: usize) {
    let cursor = doc.cursor();
    doc.move_cursor(DocumentLocation::new(cursor.line.saturating_add(n), cursor.char));
}
