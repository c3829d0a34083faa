//! The seam through which human moves enter a tournament.
//!
//! The core never reads a terminal. When a human is up, the tournament asks
//! a [`MoveProvider`] to pick one of the offered cell keys, then validates the
//! answer itself.

use derive_more::{Display, Error};

/// Failure to obtain a move from outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Move provider error: {} at {}:{}", message, file, line)]
pub struct MoveProviderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MoveProviderError {
    /// Creates a new provider error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Supplies a human player's choice of cell.
pub trait MoveProvider {
    /// Returns one of `options`, the unmarked cell keys rendered as text.
    ///
    /// `prompt` names the player being asked.
    ///
    /// # Errors
    ///
    /// Implementations fail when no answer can be obtained, for example
    /// because input was closed.
    fn choose_cell(&mut self, options: &[String], prompt: &str)
    -> Result<String, MoveProviderError>;
}

impl<P: MoveProvider + ?Sized> MoveProvider for &mut P {
    fn choose_cell(
        &mut self,
        options: &[String],
        prompt: &str,
    ) -> Result<String, MoveProviderError> {
        (**self).choose_cell(options, prompt)
    }
}

/// Provider for games without humans; asking it is always an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unattended;

impl MoveProvider for Unattended {
    fn choose_cell(
        &mut self,
        _options: &[String],
        prompt: &str,
    ) -> Result<String, MoveProviderError> {
        Err(MoveProviderError::new(format!(
            "No one is at the table to answer: {}",
            prompt
        )))
    }
}

/// Provider that answers from a fixed script, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    answers: std::collections::VecDeque<String>,
}

impl Scripted {
    /// Creates a provider that hands out `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not yet handed out.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl MoveProvider for Scripted {
    fn choose_cell(
        &mut self,
        _options: &[String],
        prompt: &str,
    ) -> Result<String, MoveProviderError> {
        self.answers
            .pop_front()
            .ok_or_else(|| MoveProviderError::new(format!("Script ran out at: {}", prompt)))
    }
}
