use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::app::{App, Message, Model, update};
use crate::document::TextDocument;
use crate::file;
use crate::highlight::Highlighter;
use crate::input::{InputSource, Key, TerminalInput};
use crate::scheduler::{Clock, EventHandler, Scheduler, SystemClock};
use crate::ui::style::Theme;

use super::effects::handle_message_side_effects;
use super::input::message_for_key;

/// How long a toast stays in the status bar.
pub(super) const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Everything the run loop hooks touch.
pub(super) struct Session<B: Backend> {
    pub(super) model: Model,
    terminal: Terminal<B>,
    highlighter: Box<dyn Highlighter>,
    theme: Theme,
    frame_idx: u64,
    last_toast: Option<u64>,
}

impl<B: Backend + 'static> Session<B> {
    fn dispatch(&mut self, msg: Message, scheduler: &mut Scheduler<Self>) {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        self.model = update(std::mem::take(&mut self.model), msg);
        handle_message_side_effects(&mut self.model, &side_msg);
        self.schedule_toast_expiry(scheduler);

        if self.model.should_quit {
            scheduler.quit();
        } else {
            scheduler.request_redraw();
        }
    }

    fn schedule_toast_expiry(&mut self, scheduler: &mut Scheduler<Self>) {
        let Some(id) = self.model.toast_id() else {
            return;
        };
        if self.last_toast == Some(id) {
            return;
        }
        self.last_toast = Some(id);
        scheduler.add_timer(TOAST_DURATION, move |session: &mut Self, scheduler| {
            if session.model.expire_toast(id) {
                scheduler.request_redraw();
            }
            Ok(())
        });
    }
}

impl<B: Backend + 'static> EventHandler for Session<B> {
    fn key(&mut self, key: Key, scheduler: &mut Scheduler<Self>) -> Result<()> {
        if let Some(msg) = message_for_key(key) {
            self.dispatch(msg, scheduler);
        }
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16, scheduler: &mut Scheduler<Self>) -> Result<()> {
        self.dispatch(Message::Resize(cols, rows), scheduler);
        Ok(())
    }

    fn redraw(&mut self, _scheduler: &mut Scheduler<Self>) -> Result<()> {
        let _scope = crate::perf::scope("frame.draw");
        self.frame_idx += 1;
        let Self {
            model,
            terminal,
            highlighter,
            theme,
            ..
        } = self;
        terminal
            .draw(|frame| crate::ui::render(model, frame, &**highlighter, theme))
            .map_err(|err| anyhow!("Failed to draw frame: {err}"))?;
        tracing::trace!(frame = self.frame_idx, "frame drawn");
        Ok(())
    }
}

impl App {
    /// Open the file, take over the terminal and edit until quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, if the
    /// terminal cannot be initialized, or if the run loop fails.
    pub fn run(self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let read_scope = crate::perf::scope("app.read_file");
        let (document, notice) = self.open_document()?;
        drop(read_scope);

        let init_scope = crate::perf::scope("app.ratatui_init");
        let terminal = ratatui::try_init()
            .context("Failed to initialize terminal - red requires an interactive terminal")?;
        drop(init_scope);

        let result = self.run_in(terminal, document, notice, &mut TerminalInput, SystemClock);

        ratatui::restore();
        result.map(|_| ())
    }

    /// Read the startup document. A path that doesn't exist yet gives an
    /// empty document and a notice for the status bar.
    pub(super) fn open_document(&self) -> Result<(TextDocument, Option<String>)> {
        let Some(path) = self.file_path.as_deref() else {
            return Ok((TextDocument::new(), None));
        };
        match file::read_lines(path) {
            Ok(lines) => {
                let document = TextDocument::from_lines(lines);
                tracing::info!(path = %path.display(), lines = document.line_count(), "opened");
                Ok((document, None))
            }
            Err(err) if err.is_not_found() => {
                tracing::info!(path = %path.display(), "new file");
                Ok((
                    TextDocument::new(),
                    Some(format!("New file {}", path.display())),
                ))
            }
            Err(err) => {
                tracing::error!(path = %err.path().display(), error = %err, "open failed");
                Err(err).context("Failed to open document")
            }
        }
    }

    /// Run a session on any backend, input source and clock. Returns the
    /// final model.
    pub(crate) fn run_in<B, I>(
        self,
        terminal: Terminal<B>,
        document: TextDocument,
        notice: Option<String>,
        input: &mut I,
        clock: impl Clock + 'static,
    ) -> Result<Model>
    where
        B: Backend + 'static,
        I: InputSource + ?Sized,
    {
        let size = terminal
            .size()
            .map_err(|err| anyhow!("Failed to query terminal size: {err}"))?;
        let mut model = Model::new(document, self.file_path, (size.width, size.height));
        if let Some(notice) = notice {
            model.show_toast(super::ToastLevel::Info, notice);
        }

        let mut session = Session {
            model,
            terminal,
            highlighter: self.highlighter,
            theme: self.theme,
            frame_idx: 0,
            last_toast: None,
        };
        let mut scheduler = Scheduler::with_clock(clock);
        session.schedule_toast_expiry(&mut scheduler);
        scheduler.request_redraw();
        scheduler.run(&mut session, input)?;
        Ok(session.model)
    }
}
