use crate::app::Message;
use crate::input::Key;

/// Key bindings.
///
/// Printable characters insert themselves; control characters without a
/// binding are ignored.
pub fn message_for_key(key: Key) -> Option<Message> {
    let msg = match key {
        Key::Ctrl('q') => Message::Quit,
        Key::Ctrl('s') => Message::Save,
        Key::Enter | Key::Ctrl('j') => Message::InsertNewline,
        Key::Backspace | Key::Ctrl('h') => Message::Backspace,
        Key::Delete => Message::Delete,
        Key::Up => Message::MoveUp,
        Key::Down => Message::MoveDown,
        Key::Left => Message::MoveLeft,
        Key::Right => Message::MoveRight,
        Key::PageUp => Message::PageUp,
        Key::PageDown => Message::PageDown,
        Key::Home => Message::MoveHome,
        Key::End => Message::MoveEnd,
        Key::Tab => Message::InsertChar('\t'),
        Key::Char(ch) if !ch.is_control() => Message::InsertChar(ch),
        Key::Char(_) | Key::Ctrl(_) => return None,
    };
    Some(msg)
}
