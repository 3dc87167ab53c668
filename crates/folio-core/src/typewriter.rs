//! Typing effect for the hero subtitle
//!
//! The subtitle text is captured, cleared, and revealed one character per step
//! behind a blinking-cursor border. The sequence is a cancelable task: every
//! scheduled step carries the generation it was scheduled under, and
//! [`TypewriterTask::cancel`] / [`TypewriterTask::restart`] bump the generation
//! so stale steps fall through without touching the element.
//!
//! Timeline with the default timing and the text `"Hello"`:
//!
//! ```text
//! 1500ms  H
//! 1600ms  He
//! 1700ms  Hel
//! 1800ms  Hell
//! 1900ms  Hello
//! 2000ms  (all shown, cursor hold starts)
//! 2500ms  cursor border removed
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::TypewriterTiming;
use crate::env::{Environment, TimerId};
use crate::error::Result;

const CURSOR_PROPERTY: &str = "border-right";
const CURSOR_HIDDEN: &str = "none";

/// Progress of a typewriter task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterState {
    /// Waiting for the initial delay
    Pending,
    /// `revealed` characters are on screen
    Typing { revealed: usize },
    /// Every character is shown; the cursor is about to be removed
    Finishing,
    /// Cursor removed, nothing else scheduled
    Done,
    /// Stopped by [`TypewriterTask::cancel`] with `revealed` characters left
    /// on screen
    Cancelled { revealed: usize },
}

impl TypewriterState {
    /// Number of characters currently shown
    #[must_use]
    pub const fn revealed(self, total: usize) -> usize {
        match self {
            Self::Pending => 0,
            Self::Typing { revealed } | Self::Cancelled { revealed } => revealed,
            Self::Finishing | Self::Done => total,
        }
    }
}

enum Step {
    Reveal(String),
    Hold,
    RemoveCursor,
}

struct Inner<E: Environment> {
    env: Rc<E>,
    element: E::Element,
    chars: Vec<char>,
    timing: TypewriterTiming,
    state: TypewriterState,
    generation: u64,
    pending: Option<TimerId>,
}

/// Handle to a running (or finished) typing sequence
pub struct TypewriterTask<E: Environment> {
    inner: Rc<RefCell<Inner<E>>>,
}

impl<E: Environment> Clone for TypewriterTask<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: Environment> std::fmt::Debug for TypewriterTask<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TypewriterTask")
            .field("chars", &inner.chars.len())
            .field("state", &inner.state)
            .field("generation", &inner.generation)
            .finish_non_exhaustive()
    }
}

impl<E: Environment> TypewriterTask<E> {
    /// Clear `element`, show the cursor and schedule the first step.
    ///
    /// # Errors
    ///
    /// Returns an error if the first step cannot be scheduled.
    pub fn start(
        env: Rc<E>,
        element: E::Element,
        text: &str,
        timing: TypewriterTiming,
    ) -> Result<Self> {
        let task = Self {
            inner: Rc::new(RefCell::new(Inner {
                env,
                element,
                chars: text.chars().collect(),
                timing,
                state: TypewriterState::Pending,
                generation: 0,
                pending: None,
            })),
        };
        task.begin()?;
        Ok(task)
    }

    /// Current progress
    #[must_use]
    pub fn state(&self) -> TypewriterState {
        self.inner.borrow().state
    }

    /// Full text being typed
    #[must_use]
    pub fn text(&self) -> String {
        self.inner.borrow().chars.iter().collect()
    }

    /// Stop the sequence. The partially typed text stays; the cursor goes.
    ///
    /// Cancelling a finished task does nothing.
    pub fn cancel(&self) {
        let (env, element, pending) = {
            let mut inner = self.inner.borrow_mut();
            if matches!(
                inner.state,
                TypewriterState::Done | TypewriterState::Cancelled { .. }
            ) {
                return;
            }
            let revealed = inner.state.revealed(inner.chars.len());
            inner.generation = inner.generation.wrapping_add(1);
            inner.state = TypewriterState::Cancelled { revealed };
            (
                Rc::clone(&inner.env),
                inner.element.clone(),
                inner.pending.take(),
            )
        };

        if let Some(id) = pending {
            env.clear_timeout(id);
        }
        env.set_style(&element, CURSOR_PROPERTY, CURSOR_HIDDEN);
        tracing::debug!("typewriter cancelled");
    }

    /// Cancel any in-flight sequence and type the text again from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the first step cannot be scheduled.
    pub fn restart(&self) -> Result<()> {
        self.cancel();
        self.begin()
    }

    fn begin(&self) -> Result<()> {
        let (env, element, cursor, delay, generation) = {
            let mut inner = self.inner.borrow_mut();
            inner.generation = inner.generation.wrapping_add(1);
            inner.state = TypewriterState::Pending;
            (
                Rc::clone(&inner.env),
                inner.element.clone(),
                inner.timing.cursor_border.clone(),
                inner.timing.start_delay_ms,
                inner.generation,
            )
        };

        env.set_text(&element, "");
        env.set_style(&element, CURSOR_PROPERTY, &cursor);
        tracing::debug!(delay_ms = delay, "typewriter scheduled");

        self.schedule(delay, generation)
    }

    fn schedule(&self, delay_ms: u32, generation: u64) -> Result<()> {
        let env = Rc::clone(&self.inner.borrow().env);
        let task = self.clone();
        let id = env.set_timeout(delay_ms, Box::new(move || task.step(generation)))?;

        let mut inner = self.inner.borrow_mut();
        if inner.generation == generation {
            inner.pending = Some(id);
        }
        Ok(())
    }

    fn step(&self, generation: u64) {
        let (env, element, step, timing) = {
            let mut inner = self.inner.borrow_mut();
            if inner.generation != generation {
                return;
            }
            inner.pending = None;

            let total = inner.chars.len();
            let step = match inner.state {
                TypewriterState::Pending | TypewriterState::Typing { .. } => {
                    let revealed = inner.state.revealed(total);
                    if revealed < total {
                        let next = revealed.saturating_add(1);
                        inner.state = TypewriterState::Typing { revealed: next };
                        Step::Reveal(inner.chars.iter().take(next).collect())
                    } else {
                        inner.state = TypewriterState::Finishing;
                        Step::Hold
                    }
                }
                TypewriterState::Finishing => {
                    inner.state = TypewriterState::Done;
                    Step::RemoveCursor
                }
                TypewriterState::Done | TypewriterState::Cancelled { .. } => return,
            };

            (
                Rc::clone(&inner.env),
                inner.element.clone(),
                step,
                (inner.timing.step_ms, inner.timing.cursor_hold_ms),
            )
        };

        let (step_ms, hold_ms) = timing;
        let rescheduled = match step {
            Step::Reveal(prefix) => {
                env.set_text(&element, &prefix);
                self.schedule(step_ms, generation)
            }
            Step::Hold => self.schedule(hold_ms, generation),
            Step::RemoveCursor => {
                env.set_style(&element, CURSOR_PROPERTY, CURSOR_HIDDEN);
                tracing::debug!("typewriter finished");
                Ok(())
            }
        };

        if let Err(e) = rescheduled {
            tracing::warn!("typewriter stopped: {e}");
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::fake::FakeEnvironment;

    fn typing(text: &str) -> (Rc<FakeEnvironment>, crate::fake::ElementId, TypewriterTask<FakeEnvironment>) {
        let env = Rc::new(FakeEnvironment::new());
        let subtitle = env.add_element(&[".hero-subtitle"]);
        env.set_text(&subtitle, text);
        let task =
            TypewriterTask::start(Rc::clone(&env), subtitle, text, TypewriterTiming::default())
                .unwrap();
        (env, subtitle, task)
    }

    #[test]
    fn test_start_clears_text_and_shows_cursor() {
        let (env, subtitle, task) = typing("Hello");
        assert_eq!(env.text(&subtitle), "");
        assert_eq!(
            env.style(subtitle, "border-right").as_deref(),
            Some("2px solid var(--accent-yellow)")
        );
        assert_eq!(task.state(), TypewriterState::Pending);
    }

    #[test]
    fn test_nothing_before_initial_delay() {
        let (env, subtitle, _task) = typing("Hello");
        env.advance(1499);
        assert_eq!(env.text(&subtitle), "");
    }

    #[test]
    fn test_one_character_per_step() {
        let (env, subtitle, task) = typing("Hello");
        env.advance(1500);
        assert_eq!(env.text(&subtitle), "H");
        env.advance(100);
        assert_eq!(env.text(&subtitle), "He");
        env.advance(300);
        assert_eq!(env.text(&subtitle), "Hello");
        assert_eq!(task.state(), TypewriterState::Typing { revealed: 5 });
    }

    #[test]
    fn test_cursor_removed_after_hold() {
        let (env, subtitle, task) = typing("Hello");
        env.advance(2499);
        assert_eq!(task.state(), TypewriterState::Finishing);
        assert_ne!(env.style(subtitle, "border-right").as_deref(), Some("none"));

        env.advance(1);
        assert_eq!(task.state(), TypewriterState::Done);
        assert_eq!(env.style(subtitle, "border-right").as_deref(), Some("none"));
        assert_eq!(env.pending_timers(), 0);
    }

    #[test]
    fn test_empty_text_only_holds_cursor() {
        let (env, subtitle, task) = typing("");
        env.advance(2000);
        assert_eq!(task.state(), TypewriterState::Done);
        assert_eq!(env.text(&subtitle), "");
    }

    #[test]
    fn test_multibyte_characters_step_whole() {
        let (env, subtitle, _task) = typing("h\u{e9}\u{1f44b}");
        env.advance(1600);
        assert_eq!(env.text(&subtitle), "h\u{e9}");
        env.advance(100);
        assert_eq!(env.text(&subtitle), "h\u{e9}\u{1f44b}");
    }

    #[test]
    fn test_cancel_stops_typing() {
        let (env, subtitle, task) = typing("Hello");
        env.advance(1600);
        task.cancel();
        env.advance(5000);

        assert_eq!(env.text(&subtitle), "He");
        assert_eq!(task.state(), TypewriterState::Cancelled { revealed: 2 });
        assert_eq!(task.state().revealed(5), 2);
        assert_eq!(env.style(subtitle, "border-right").as_deref(), Some("none"));
        assert_eq!(env.pending_timers(), 0);
    }

    #[test]
    fn test_restart_does_not_interleave() {
        let (env, subtitle, task) = typing("Hello");
        env.advance(1700);
        assert_eq!(env.text(&subtitle), "Hel");

        task.restart().unwrap();
        assert_eq!(env.text(&subtitle), "");

        env.advance(1500);
        assert_eq!(env.text(&subtitle), "H");
        env.advance(1000);
        assert_eq!(env.text(&subtitle), "Hello");
        assert_eq!(task.state(), TypewriterState::Done);
    }

    #[test]
    fn test_cancel_after_done_is_noop() {
        let (env, _subtitle, task) = typing("Hi");
        env.advance(5000);
        task.cancel();
        assert_eq!(task.state(), TypewriterState::Done);
        assert_eq!(task.text(), "Hi");
    }
}
