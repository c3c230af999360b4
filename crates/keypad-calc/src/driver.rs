//! Driving an engine from a front end
//!
//! A [`Session`] owns an [`Engine`] and a [`DisplaySink`]. Every event that
//! changes what should be shown triggers exactly one render, so front ends
//! never poll the engine. The same scenario code then runs against any sink:
//! the recording sink in tests, the terminal in the CLI.

use crate::core::CalcResult;
use crate::engine::{Display, Engine, Outcome};
use crate::input::InputEvent;
use tracing::trace;

/// Receives display frames
pub trait DisplaySink {
    /// Shows one frame
    fn render(&mut self, display: &Display);
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn render(&mut self, display: &Display) {
        (**self).render(display);
    }
}

/// Sink that keeps every frame it was given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    frames: Vec<Display>,
}

impl RecordingSink {
    /// Creates an empty recording
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames, oldest first
    #[must_use]
    pub fn frames(&self) -> &[Display] {
        &self.frames
    }

    /// The most recent frame
    #[must_use]
    pub fn last(&self) -> Option<&Display> {
        self.frames.last()
    }

    /// Number of renders so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if nothing was rendered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl DisplaySink for RecordingSink {
    fn render(&mut self, display: &Display) {
        self.frames.push(display.clone());
    }
}

/// An engine wired to a display
#[derive(Debug)]
pub struct Session<S: DisplaySink> {
    engine: Engine,
    sink: S,
}

impl<S: DisplaySink> Session<S> {
    /// Starts a fresh engine and renders its initial display
    pub fn new(sink: S) -> Self {
        Self::with_engine(Engine::new(), sink)
    }

    /// Wraps an existing engine and renders its current display
    pub fn with_engine(engine: Engine, mut sink: S) -> Self {
        sink.render(&engine.display());
        Self { engine, sink }
    }

    /// Handles one event, rendering if the outcome asks for it
    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        let outcome = self.engine.handle(event);
        if outcome.needs_refresh() {
            self.sink.render(&self.engine.display());
        } else {
            trace!(%event, "no refresh");
        }
        outcome
    }

    /// Handles every event of one script token (see [`InputEvent::expand_token`])
    pub fn feed_token(&mut self, token: &str) -> CalcResult<()> {
        for event in InputEvent::expand_token(token)? {
            self.handle(event);
        }
        Ok(())
    }

    /// Feeds a whitespace-separated script, stopping at the first unknown token
    pub fn feed_script(&mut self, script: &str) -> CalcResult<()> {
        script
            .split_whitespace()
            .try_for_each(|token| self.feed_token(token))
    }

    /// What the display shows now
    #[must_use]
    pub fn display(&self) -> Display {
        self.engine.display()
    }

    /// The engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Ends the session, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

// ===== Scenario checks =====

#[cfg(any(test, feature = "scenarios"))]
pub use scenarios::{
    run_all_scenarios, verify_arithmetic, verify_error_recovery, verify_functions, verify_memory,
    verify_power,
};

/// Keypad scenarios that run against ANY sink and assert on the engine's
/// display. They panic on a mismatch, so they only exist for tests and
/// behind the `scenarios` feature.
#[cfg(any(test, feature = "scenarios"))]
mod scenarios {
    use super::{DisplaySink, Session};

    fn run<S: DisplaySink>(session: &mut Session<S>, script: &str) -> String {
        session.feed_script(script).unwrap();
        session.display().current_input
    }

    /// Verifies operator chaining, collapsing and percent terms
    pub fn verify_arithmetic<S: DisplaySink>(session: &mut Session<S>) {
        assert_eq!(run(session, "C 2 + 3 ="), "5");
        assert_eq!(run(session, "C 5 + - 3 ="), "2");
        // the second operator replaces the first and drops the 3
        assert_eq!(run(session, "C 2 + 3 * 4 ="), "8");
        assert_eq!(run(session, "C 200 + 50 % ="), "250");
        assert_eq!(run(session, "C 10 % 3 ="), "Error");
    }

    /// Verifies function keys and their error cases
    pub fn verify_functions<S: DisplaySink>(session: &mut Session<S>) {
        assert_eq!(run(session, "C 9 sqrt"), "3");
        assert_eq!(run(session, "C 4 neg sqrt"), "Error");
        assert_eq!(run(session, "C 0 reciprocal"), "Error");
        assert_eq!(run(session, "C 2 asin"), "Error");
    }

    /// Verifies power entry through `=` and through an operator
    pub fn verify_power<S: DisplaySink>(session: &mut Session<S>) {
        assert_eq!(run(session, "C 2 pow 10 ="), "1024");
        assert_eq!(run(session, "C 2 pow 10 +"), "1024");
        assert_eq!(session.display().expression, "");
    }

    /// Verifies the memory register survives clearing
    pub fn verify_memory<S: DisplaySink>(session: &mut Session<S>) {
        assert_eq!(run(session, "MC C 7 M+ C MR"), "7");
        assert_eq!(run(session, "C 3 M+ C MR"), "10");
        run(session, "MC");
    }

    /// Verifies that an error leaves the engine usable
    pub fn verify_error_recovery<S: DisplaySink>(session: &mut Session<S>) {
        assert_eq!(run(session, "C 5 / 0 ="), "Error");
        assert_eq!(run(session, "4 + 1 ="), "5");
    }

    /// Runs every scenario check
    pub fn run_all_scenarios<S: DisplaySink>(session: &mut Session<S>) {
        verify_arithmetic(session);
        verify_functions(session);
        verify_power(session);
        verify_memory(session);
        verify_error_recovery(session);
    }
}
