//! Container runtime invocation.
//!
//! Every interaction with the runtime (`docker`, `podman`, ...) is modelled as
//! an [`Invocation`]: a program plus an argument vector. Invocations are run
//! through the [`CommandRunner`] seam so provisioning and SSH logic can be
//! exercised without a runtime on the host. [`SystemRunner`] is the real
//! implementation backed by `std::process::Command`.
//!
//! Arguments are never passed through a shell, so host paths containing
//! shell metacharacters reach the runtime verbatim.

mod probe;

use std::fmt;
use std::io;
use std::process::{Command, ExitStatus, Stdio};

pub use probe::RuntimeProber;

/// How the child process's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Share the operator's terminal.
    #[default]
    Inherit,
    /// Detach stdin and drop all output.
    Discard,
}

/// A single runtime command line expressed as an argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    /// Indices of arguments that are always quoted when displayed.
    scripts: Vec<usize>,
    output: OutputMode,
}

impl Invocation {
    /// Start an invocation of `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            scripts: Vec::new(),
            output: OutputMode::Inherit,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append several arguments in order.
    #[must_use]
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append a shell script argument, as passed to `bash -c`.
    ///
    /// The argument reaches the program unchanged; only the displayed line
    /// differs, where it is single-quoted even when it needs no quoting.
    #[must_use]
    pub fn script(mut self, value: impl Into<String>) -> Self {
        self.scripts.push(self.args.len());
        self.args.push(value.into());
        self
    }

    /// Set how the standard streams are wired.
    #[must_use]
    pub const fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// The program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument vector, excluding the program.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The configured stream wiring.
    #[must_use]
    pub const fn output(&self) -> OutputMode {
        self.output
    }

    /// Render the arguments as the equivalent shell line, without the program.
    ///
    /// Script arguments and arguments containing characters outside a
    /// conservative safe set are single-quoted.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.args
            .iter()
            .enumerate()
            .map(|(index, value)| {
                if self.scripts.contains(&index) {
                    single_quote(value)
                } else {
                    quote_for_display(value)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_for_display(&self.program))?;
        if !self.args.is_empty() {
            write!(f, " {}", self.command_line())?;
        }
        Ok(())
    }
}

fn quote_for_display(value: &str) -> String {
    let is_safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if is_safe {
        return value.to_owned();
    }
    single_quote(value)
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Exit status reported by a finished invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    /// Status for a process that exited with `code`.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status for a process that ended without an exit code (killed by a signal).
    #[must_use]
    pub const fn terminated() -> Self {
        Self { code: None }
    }

    /// Whether the process exited with status zero.
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }

    /// The exit code, if the process exited normally.
    #[must_use]
    pub const fn code(self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Behaviour required to execute runtime invocations.
///
/// An `Err` means the process could not be launched at all; a launched
/// process always yields `Ok` with its exit status.
pub trait CommandRunner {
    /// Run the invocation to completion.
    ///
    /// # Errors
    ///
    /// Returns the launch error, e.g. `io::ErrorKind::NotFound` when the
    /// program is not on `PATH`.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus>;
}

/// Runs invocations as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus> {
        tracing::debug!(command = %invocation, "running runtime command");
        let mut command = Command::new(invocation.program());
        command.args(invocation.arguments());
        if invocation.output() == OutputMode::Discard {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }
        let status = CommandStatus::from(command.status()?);
        tracing::debug!(code = ?status.code(), "runtime command finished");
        Ok(status)
    }
}
