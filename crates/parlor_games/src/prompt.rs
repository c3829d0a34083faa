//! Line-oriented prompts with input validation.
//!
//! Every question loops until it gets an acceptable answer, printing a short
//! apology after each rejected line. Messages are prefixed with `=> `.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use derive_more::{Display, Error};
use parlor_tictactoe::{Marker, MoveProvider, MoveProviderError};
use tracing::{debug, instrument, warn};

/// Failure to talk to the player.
#[derive(Debug, Clone, Display, Error)]
#[display("Prompt error: {} at {}:{}", message, file, line)]
pub struct PromptError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PromptError {
    /// Creates a new prompt error at the caller's location.
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

impl From<std::io::Error> for PromptError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Joins `items` for a sentence: `a`, `a or b`, `a, b, or c`.
///
/// `word` goes before the last item; `delimiter` separates the rest.
pub fn joinor<T: Display>(items: &[T], delimiter: &str, word: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, last] => format!("{} {} {}", first, word, last),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{}{}{} {}", head.join(delimiter), delimiter, word, last)
        }
    }
}

/// Asks questions on `output` and reads answers from `input`.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wraps an input/output pair.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Direct access to the output, for rendering.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Gives back the input and output.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Prints `=> message`.
    pub fn say(&mut self, message: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "=> {}", message)?;
        Ok(())
    }

    /// Prints an empty line.
    pub fn blank_line(&mut self) -> Result<(), PromptError> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Clears the terminal and homes the cursor.
    pub fn clear_screen(&mut self) -> Result<(), PromptError> {
        execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    /// Reads one line with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Fails when input is closed.
    pub fn read_line(&mut self) -> Result<String, PromptError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::new("Input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Reads one trimmed, lowercased line.
    pub fn read_formatted(&mut self) -> Result<String, PromptError> {
        Ok(self.read_line()?.to_lowercase())
    }

    /// Asks `message` until `parse` accepts the trimmed answer.
    pub fn ask_until<T>(
        &mut self,
        message: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T, PromptError> {
        loop {
            self.say(message)?;
            let answer = self.read_line()?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!(answer = %answer, "Rejected input");
            self.say("Sorry, invalid input.")?;
        }
    }

    /// Asks a yes/no question; accepts `y`, `n`, `yes` and `no` in any case.
    #[instrument(skip(self))]
    pub fn yes_no(&mut self, message: &str) -> Result<bool, PromptError> {
        loop {
            self.say(format!("{} (y/n)", message.trim()))?;
            match self.read_formatted()?.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Sorry, must be y or n")?,
            }
        }
    }

    /// Asks for a whole number, zero included.
    pub fn positive_int(&mut self, message: &str) -> Result<u32, PromptError> {
        self.ask_until(message, parse_digits)
    }

    /// Asks for a whole number greater than zero.
    pub fn strict_positive_int(&mut self, message: &str) -> Result<u32, PromptError> {
        self.ask_until(message, |s| parse_digits(s).filter(|&n| n > 0))
    }

    /// Asks for a non-blank name.
    pub fn name(&mut self, message: &str) -> Result<String, PromptError> {
        self.ask_until(message, |s| (!s.is_empty()).then(|| s.to_string()))
    }

    /// Asks for a one-character marker nobody in `taken` uses.
    #[instrument(skip(self, taken))]
    pub fn marker(&mut self, message: &str, taken: &[Marker]) -> Result<Marker, PromptError> {
        loop {
            let marker = self.ask_until(message, |s| {
                (s.chars().count() == 1)
                    .then(|| Marker::new(s).ok())
                    .flatten()
            })?;
            if !taken.contains(&marker) {
                return Ok(marker);
            }
            self.say("Sorry, the marker is already taken")?;
        }
    }

    /// Asks for one of `options`, listing them after `message`.
    ///
    /// Answers are lowercased. An unambiguous prefix selects its option;
    /// an ambiguous one prompts `Do you mean a or b?`.
    #[instrument(skip(self, options), fields(options = options.len()))]
    pub fn choice<S: AsRef<str>>(
        &mut self,
        options: &[S],
        message: &str,
    ) -> Result<String, PromptError> {
        let options: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
        let message = format!("{} {}", message.trim(), joinor(&options, ", ", "or"));

        loop {
            self.say(&message)?;
            let answer = self.read_formatted()?;
            if options.contains(&answer.as_str()) {
                return Ok(answer);
            }

            let possible: Vec<&str> = options
                .iter()
                .copied()
                .filter(|option| option.starts_with(answer.as_str()))
                .collect();
            match possible.len() {
                n if n == 0 || n == options.len() => self.say("Sorry, invalid choice.")?,
                1 => return Ok(possible[0].to_string()),
                _ => self.say(format!("Do you mean {}?", joinor(&possible, ", ", "or")))?,
            }
        }
    }

    /// Shows `message` and waits for the player to press enter.
    pub fn wait_for_enter(&mut self, message: &str) -> Result<(), PromptError> {
        self.say(message)?;
        self.read_line()?;
        Ok(())
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl<R: BufRead, W: Write> MoveProvider for Prompter<R, W> {
    fn choose_cell(
        &mut self,
        options: &[String],
        prompt: &str,
    ) -> Result<String, MoveProviderError> {
        self.choice(options, prompt).map_err(|err| {
            warn!(error = %err, "Could not read a move");
            MoveProviderError::new(err.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_parts().1).unwrap()
    }

    #[test]
    fn test_joinor() {
        assert_eq!(joinor::<&str>(&[], ", ", "or"), "");
        assert_eq!(joinor(&[1], ", ", "or"), "1");
        assert_eq!(joinor(&[1, 2], ", ", "or"), "1 or 2");
        assert_eq!(joinor(&[1, 2, 3], "; ", "and"), "1; 2; and 3");
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("007"), Some(7));
        assert_eq!(parse_digits("-1"), None);
        assert_eq!(parse_digits(""), None);
        assert_eq!(parse_digits("99999999999"), None);
    }

    #[test]
    fn test_closed_input() {
        let mut p = prompter("");
        assert_eq!(p.read_line().unwrap_err().message, "Input closed");
    }

    #[test]
    fn test_yes_no_loops_until_valid() {
        let mut p = prompter("maybe\nYES\n");
        assert!(p.yes_no("Again?").unwrap());
        let out = transcript(p);
        assert!(out.contains("=> Again? (y/n)"));
        assert!(out.contains("=> Sorry, must be y or n"));
    }
}
