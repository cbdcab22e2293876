//! Operator console: coloured status lines and prompts.
//!
//! The console is generic over its reader and writer so the interactive flow
//! can be driven from in-memory buffers in tests. Colour is cosmetic; with
//! colour disabled the exact same text is written without escape sequences.

use std::io::{BufRead, Write};

use crossterm::style::{Color, Stylize};

use crate::error::ConsoleError;

/// Category of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral progress information.
    Info,
    /// Something the operator should look at.
    Warning,
    /// An operation failed.
    Error,
    /// An operation completed.
    Success,
}

impl StatusKind {
    const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
            Self::Success => Color::Green,
        }
    }
}

/// Decide whether status lines are coloured.
///
/// Honours the `NO_COLOR` convention: any non-empty value disables colour
/// regardless of configuration.
#[must_use]
pub fn color_enabled<E: mockable::Env>(configured: bool, env: &E) -> bool {
    let suppressed = env.string("NO_COLOR").is_some_and(|value| !value.is_empty());
    configured && !suppressed
}

/// Interpret a yes/no answer. Anything unrecognised counts as no.
#[must_use]
pub fn parse_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

/// Reads operator answers from `R` and writes status lines to `W`.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over the given streams.
    #[must_use]
    pub const fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Write one status line of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the output stream rejects the write.
    pub fn status(&mut self, kind: StatusKind, message: &str) -> Result<(), ConsoleError> {
        if self.color {
            writeln!(self.output, "{}", message.with(kind.color()))?;
        } else {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }

    /// Write an informational line.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the output stream rejects the write.
    pub fn info(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.status(StatusKind::Info, message)
    }

    /// Write a warning line.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the output stream rejects the write.
    pub fn warn(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.status(StatusKind::Warning, message)
    }

    /// Write an error line.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the output stream rejects the write.
    pub fn error(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.status(StatusKind::Error, message)
    }

    /// Write a success line.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the output stream rejects the write.
    pub fn success(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.status(StatusKind::Success, message)
    }

    /// Write an uncoloured line.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the output stream rejects the write.
    pub fn line(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print `question` and read one answer line, without its line ending.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::InputClosed` when the input reaches end of file
    /// and `ConsoleError::Io` on read or write failures.
    pub fn prompt(&mut self, question: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(answer.trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Ask a yes/no question.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::prompt`].
    pub fn confirm(&mut self, question: &str) -> Result<bool, ConsoleError> {
        let answer = self.prompt(&format!("{question} (o/n) : "))?;
        Ok(parse_yes(&answer))
    }

    /// Consume the console and return its output stream.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }
}
