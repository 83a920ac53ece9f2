//! Host input.
//!
//! The scheduler waits on an [`InputSource`] with a timeout and gets back
//! at most one [`InputEvent`]. [`TerminalInput`] is the crossterm-backed
//! source used at runtime.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press, already decoded from the terminal's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    /// A letter pressed with Control, lower-cased.
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Backspace,
    Delete,
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { cols: u16, rows: u16 },
}

/// Something that can be waited on for input.
pub trait InputSource {
    /// Wait up to `timeout` (forever when `None`) for one event.
    ///
    /// `Ok(None)` means nothing worth dispatching arrived: the wait timed
    /// out, or the host delivered an event the editor ignores.
    ///
    /// # Errors
    ///
    /// Returns an error if the host input channel fails.
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>>;
}

/// Input from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>> {
        if let Some(timeout) = timeout
            && !event::poll(timeout)?
        {
            return Ok(None);
        }
        Ok(translate_event(&event::read()?))
    }
}

/// Convert a crossterm event into an editor event.
pub fn translate_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(*key).map(InputEvent::Key),
        Event::Resize(cols, rows) => Some(InputEvent::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

/// Convert a crossterm key event. Releases and repeats reported by the
/// kitty protocol are dropped.
pub fn translate_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let translated = match key.code {
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        _ => return None,
    };
    Some(translated)
}

#[cfg(test)]
pub(crate) mod scripted {
    //! Deterministic input for driving the scheduler in tests.

    use std::collections::VecDeque;
    use std::time::Duration;

    use anyhow::{Result, bail};

    use super::{InputEvent, InputSource, Key};
    use crate::scheduler::ManualClock;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Event(InputEvent),
        /// Let the wait time out.
        Idle,
    }

    /// Replays a fixed script. Timeouts advance the shared [`ManualClock`]
    /// by exactly the requested duration.
    #[derive(Debug)]
    pub struct ScriptedInput {
        steps: VecDeque<Step>,
        clock: ManualClock,
        /// Every timeout the scheduler asked for, in order.
        pub timeouts: Vec<Option<Duration>>,
    }

    impl ScriptedInput {
        pub fn new(clock: ManualClock) -> Self {
            Self {
                steps: VecDeque::new(),
                clock,
                timeouts: Vec::new(),
            }
        }

        pub fn key(mut self, key: Key) -> Self {
            self.steps.push_back(Step::Event(InputEvent::Key(key)));
            self
        }

        pub fn text(mut self, text: &str) -> Self {
            for ch in text.chars() {
                self = self.key(Key::Char(ch));
            }
            self
        }

        pub fn resize(mut self, cols: u16, rows: u16) -> Self {
            self.steps
                .push_back(Step::Event(InputEvent::Resize { cols, rows }));
            self
        }

        pub fn idle(mut self) -> Self {
            self.steps.push_back(Step::Idle);
            self
        }
    }

    impl InputSource for ScriptedInput {
        fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>> {
            self.timeouts.push(timeout);
            match self.steps.pop_front() {
                Some(Step::Event(event)) => Ok(Some(event)),
                Some(Step::Idle) | None => {
                    let Some(timeout) = timeout else {
                        bail!("input script exhausted with no timer pending");
                    };
                    self.clock.advance(timeout);
                    Ok(None)
                }
            }
        }
    }
}
