//! Single-threaded cooperative run loop.
//!
//! [`Scheduler::run`] multiplexes host input and timers through one
//! blocking wait: the timeout handed to the [`InputSource`] is the time
//! left until the earliest timer. Each turn either dispatches one input
//! event or fires at most one due timer, never both.

mod clock;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Result;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::input::{InputEvent, InputSource, Key};

/// Longest delay a timer can wait. Longer delays are clamped to this.
pub const MAX_DELAY: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Work deferred to a later loop turn.
pub type TimerCallback<T> = Box<dyn FnOnce(&mut T, &mut Scheduler<T>) -> Result<()>>;

/// Hooks the run loop dispatches into.
///
/// Any error returned from a hook stops the loop and is returned from
/// [`Scheduler::run`].
pub trait EventHandler: Sized {
    fn key(&mut self, key: Key, scheduler: &mut Scheduler<Self>) -> Result<()>;

    fn resize(&mut self, cols: u16, rows: u16, scheduler: &mut Scheduler<Self>) -> Result<()>;

    /// Paint the current state. Called from the coalesced redraw timer.
    fn redraw(&mut self, scheduler: &mut Scheduler<Self>) -> Result<()>;
}

struct Timer<T> {
    deadline: Instant,
    seq: u64,
    callback: TimerCallback<T>,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the earliest deadline, oldest first.
impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Timer queue and exit flag for one editor session.
pub struct Scheduler<T> {
    timers: BinaryHeap<Timer<T>>,
    next_seq: u64,
    exit: bool,
    redraw_pending: bool,
    clock: Box<dyn Clock>,
}

impl<T> fmt::Debug for Scheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("timers", &self.timers.len())
            .field("exit", &self.exit)
            .field("redraw_pending", &self.redraw_pending)
            .finish_non_exhaustive()
    }
}

impl<T: EventHandler + 'static> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EventHandler + 'static> Scheduler<T> {
    /// Create a scheduler driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            timers: BinaryHeap::new(),
            next_seq: 0,
            exit: false,
            redraw_pending: false,
            clock: Box::new(clock),
        }
    }

    /// Run `callback` once `delay` has elapsed.
    ///
    /// Timers with equal deadlines fire in the order they were added.
    /// Delays beyond [`MAX_DELAY`] are clamped to it.
    pub fn add_timer<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce(&mut T, &mut Self) -> Result<()> + 'static,
    {
        let timer = Timer {
            deadline: self.clock.now() + delay.min(MAX_DELAY),
            seq: self.next_seq,
            callback: Box::new(callback),
        };
        self.next_seq += 1;
        self.timers.push(timer);
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Ask the loop to stop. Takes effect at the top of the next turn.
    pub const fn quit(&mut self) {
        self.exit = true;
    }

    pub const fn is_quitting(&self) -> bool {
        self.exit
    }

    /// Schedule a redraw on the next idle turn unless one is already
    /// scheduled.
    pub fn request_redraw(&mut self) {
        if self.redraw_pending {
            return;
        }
        self.redraw_pending = true;
        self.add_timer(Duration::ZERO, |target: &mut T, scheduler: &mut Self| {
            scheduler.redraw_pending = false;
            target.redraw(scheduler)
        });
    }

    /// Drive `target` from `input` until [`quit`](Self::quit) is called.
    ///
    /// # Errors
    ///
    /// Returns the first error from the input source, a hook, or a timer
    /// callback. The loop does not continue after an error.
    pub fn run<I>(&mut self, target: &mut T, input: &mut I) -> Result<()>
    where
        I: InputSource + ?Sized,
    {
        while !self.exit {
            let now = self.clock.now();
            let timeout = self
                .timers
                .peek()
                .map(|timer| timer.deadline.saturating_duration_since(now));

            match input.poll(timeout)? {
                Some(InputEvent::Key(key)) => {
                    tracing::trace!(?key, "dispatch key");
                    target.key(key, self)?;
                }
                Some(InputEvent::Resize { cols, rows }) => {
                    tracing::debug!(cols, rows, "dispatch resize");
                    target.resize(cols, rows, self)?;
                }
                None => self.fire_due_timer(target)?,
            }
        }
        Ok(())
    }

    fn fire_due_timer(&mut self, target: &mut T) -> Result<()> {
        let now = self.clock.now();
        if self.timers.peek().is_none_or(|timer| timer.deadline > now) {
            return Ok(());
        }
        match self.timers.pop() {
            Some(timer) => (timer.callback)(target, self),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::scripted::ScriptedInput;
    use anyhow::bail;

    #[derive(Debug, Default)]
    struct Recorder {
        log: Vec<String>,
        redraws: usize,
    }

    impl EventHandler for Recorder {
        fn key(&mut self, key: Key, scheduler: &mut Scheduler<Self>) -> Result<()> {
            self.log.push(format!("key {key:?}"));
            match key {
                Key::Ctrl('q') => scheduler.quit(),
                Key::Ctrl('x') => bail!("handler failed"),
                _ => scheduler.request_redraw(),
            }
            Ok(())
        }

        fn resize(&mut self, cols: u16, rows: u16, scheduler: &mut Scheduler<Self>) -> Result<()> {
            self.log.push(format!("resize {cols}x{rows}"));
            scheduler.request_redraw();
            Ok(())
        }

        fn redraw(&mut self, _scheduler: &mut Scheduler<Self>) -> Result<()> {
            self.redraws += 1;
            self.log.push("redraw".to_string());
            Ok(())
        }
    }

    fn quit_after(delay: Duration, scheduler: &mut Scheduler<Recorder>) {
        scheduler.add_timer(delay, |_, scheduler| {
            scheduler.quit();
            Ok(())
        });
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let clock = ManualClock::new();
        let start = clock.now();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        let probe = clock.clone();
        scheduler.add_timer(Duration::ZERO, move |r: &mut Recorder, _| {
            r.log.push(format!("t1 at {:?}", probe.now() - start));
            Ok(())
        });
        let probe = clock.clone();
        scheduler.add_timer(Duration::from_millis(5), move |r: &mut Recorder, _| {
            r.log.push(format!("t2 at {:?}", probe.now() - start));
            Ok(())
        });
        quit_after(Duration::from_millis(5), &mut scheduler);

        let mut recorder = Recorder::default();
        let mut input = ScriptedInput::new(clock);
        scheduler.run(&mut recorder, &mut input).unwrap();

        assert_eq!(recorder.log, vec!["t1 at 0ns", "t2 at 5ms"]);
    }

    #[test]
    fn test_equal_deadlines_fire_in_insertion_order() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        for name in ["a", "b", "c"] {
            scheduler.add_timer(Duration::from_millis(2), move |r: &mut Recorder, _| {
                r.log.push(name.to_string());
                Ok(())
            });
        }
        quit_after(Duration::from_millis(2), &mut scheduler);

        let mut recorder = Recorder::default();
        scheduler
            .run(&mut recorder, &mut ScriptedInput::new(clock))
            .unwrap();
        assert_eq!(recorder.log, vec!["a", "b", "c"]);
    }

    /// Waits only half of each timeout, so the loop sees early wakeups.
    struct ImpatientInput {
        clock: ManualClock,
    }

    impl InputSource for ImpatientInput {
        fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>> {
            let Some(timeout) = timeout else {
                bail!("no timers left");
            };
            self.clock
                .advance(timeout.max(Duration::from_micros(2)) / 2);
            Ok(None)
        }
    }

    #[test]
    fn test_no_timer_fires_before_its_deadline() {
        let clock = ManualClock::new();
        let start = clock.now();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        let probe = clock.clone();
        scheduler.add_timer(Duration::from_millis(8), move |_: &mut Recorder, s| {
            assert!(probe.now() - start >= Duration::from_millis(8));
            s.quit();
            Ok(())
        });

        let mut recorder = Recorder::default();
        let mut input = ImpatientInput {
            clock: clock.clone(),
        };
        scheduler.run(&mut recorder, &mut input).unwrap();
        assert!(clock.now() - start >= Duration::from_millis(8));
    }

    #[test]
    fn test_huge_delay_is_clamped() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        scheduler.add_timer(Duration::MAX, |r: &mut Recorder, _| {
            r.log.push("never".to_string());
            Ok(())
        });
        let mut input = ScriptedInput::new(clock).key(Key::Ctrl('q'));

        let mut recorder = Recorder::default();
        scheduler.run(&mut recorder, &mut input).unwrap();
        assert_eq!(input.timeouts, vec![Some(MAX_DELAY)]);
        assert_eq!(recorder.log, vec!["key Ctrl('q')"]);
        assert_eq!(scheduler.pending_timers(), 1);
    }

    #[test]
    fn test_redraw_requests_coalesce() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        scheduler.request_redraw();
        scheduler.request_redraw();
        scheduler.request_redraw();
        assert_eq!(scheduler.pending_timers(), 1);
        quit_after(Duration::from_millis(1), &mut scheduler);

        let mut recorder = Recorder::default();
        scheduler
            .run(&mut recorder, &mut ScriptedInput::new(clock))
            .unwrap();
        assert_eq!(recorder.redraws, 1);
    }

    #[test]
    fn test_redraw_can_be_requested_again_after_firing() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        let mut input = ScriptedInput::new(clock)
            .key(Key::Char('a'))
            .key(Key::Char('b'))
            .idle()
            .key(Key::Char('c'))
            .idle()
            .key(Key::Ctrl('q'));

        let mut recorder = Recorder::default();
        scheduler.run(&mut recorder, &mut input).unwrap();
        assert_eq!(
            recorder.log,
            vec![
                "key Char('a')",
                "key Char('b')",
                "redraw",
                "key Char('c')",
                "redraw",
                "key Ctrl('q')",
            ]
        );
    }

    #[test]
    fn test_input_preempts_due_timer() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        scheduler.request_redraw();
        let mut input = ScriptedInput::new(clock)
            .resize(90, 30)
            .idle()
            .key(Key::Ctrl('q'));

        let mut recorder = Recorder::default();
        scheduler.run(&mut recorder, &mut input).unwrap();
        assert_eq!(recorder.log, vec!["resize 90x30", "redraw", "key Ctrl('q')"]);
        assert_eq!(
            input.timeouts[..2],
            [Some(Duration::ZERO), Some(Duration::ZERO)]
        );
    }

    #[test]
    fn test_one_timer_per_turn() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        for name in ["first", "second"] {
            scheduler.add_timer(Duration::ZERO, move |r: &mut Recorder, _| {
                r.log.push(name.to_string());
                Ok(())
            });
        }
        let mut input = ScriptedInput::new(clock)
            .idle()
            .key(Key::Char('k'))
            .idle()
            .idle()
            .key(Key::Ctrl('q'));

        let mut recorder = Recorder::default();
        scheduler.run(&mut recorder, &mut input).unwrap();
        assert_eq!(
            recorder.log,
            vec!["first", "key Char('k')", "second", "redraw", "key Ctrl('q')"]
        );
    }

    #[test]
    fn test_quit_leaves_pending_timers_unfired() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        scheduler.request_redraw();
        let mut input = ScriptedInput::new(clock).key(Key::Ctrl('q'));

        let mut recorder = Recorder::default();
        scheduler.run(&mut recorder, &mut input).unwrap();
        assert_eq!(recorder.redraws, 0);
        assert!(scheduler.is_quitting());
        assert_eq!(scheduler.pending_timers(), 1);
    }

    #[test]
    fn test_handler_error_stops_the_loop() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        let mut input = ScriptedInput::new(clock)
            .key(Key::Ctrl('x'))
            .key(Key::Char('z'));

        let mut recorder = Recorder::default();
        let err = scheduler.run(&mut recorder, &mut input).unwrap_err();
        assert_eq!(err.to_string(), "handler failed");
        assert_eq!(recorder.log, vec!["key Ctrl('x')"]);
    }

    #[test]
    fn test_timer_error_propagates() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<Recorder> = Scheduler::with_clock(clock.clone());
        scheduler.add_timer(Duration::ZERO, |_: &mut Recorder, _| bail!("timer failed"));

        let mut recorder = Recorder::default();
        let err = scheduler
            .run(&mut recorder, &mut ScriptedInput::new(clock))
            .unwrap_err();
        assert_eq!(err.to_string(), "timer failed");
    }
}
