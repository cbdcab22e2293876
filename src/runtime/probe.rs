//! Runtime availability probes.
//!
//! Both probes are single-shot and synchronous. There is no timeout, so a
//! daemon that is slow to answer blocks until the runtime gives up on its own.

use std::io;

use super::{CommandRunner, Invocation, OutputMode};
use crate::error::{ConteneurError, RuntimeError};

/// Checks whether a runtime binary exists and whether its daemon answers.
pub struct RuntimeProber<'a, R: CommandRunner> {
    runner: &'a R,
    runtime: &'a str,
}

impl<'a, R: CommandRunner> RuntimeProber<'a, R> {
    /// Create a prober for `runtime` that executes through `runner`.
    #[must_use]
    pub const fn new(runner: &'a R, runtime: &'a str) -> Self {
        Self { runner, runtime }
    }

    /// The invocation used to detect the binary.
    #[must_use]
    pub fn install_probe(&self) -> Invocation {
        Invocation::new(self.runtime)
            .arg("--version")
            .with_output(OutputMode::Discard)
    }

    /// The invocation used to detect an answering daemon.
    #[must_use]
    pub fn active_probe(&self) -> Invocation {
        Invocation::new(self.runtime)
            .arg("info")
            .with_output(OutputMode::Discard)
    }

    /// Whether the runtime binary can be launched.
    ///
    /// A launched process counts as installed whatever its exit status.
    #[must_use]
    pub fn runtime_installed(&self) -> bool {
        match self.runner.run(&self.install_probe()) {
            Ok(_) => true,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(runtime = self.runtime, "runtime binary not found");
                false
            }
            Err(error) => {
                tracing::warn!(runtime = self.runtime, %error, "install probe failed to launch");
                false
            }
        }
    }

    /// Whether the runtime daemon answered a status request.
    #[must_use]
    pub fn runtime_active(&self) -> bool {
        match self.runner.run(&self.active_probe()) {
            Ok(status) if status.success() => true,
            Ok(status) => {
                tracing::debug!(
                    runtime = self.runtime,
                    code = ?status.code(),
                    "runtime daemon reported a failure"
                );
                false
            }
            Err(error) => {
                tracing::warn!(runtime = self.runtime, %error, "activity probe failed to launch");
                false
            }
        }
    }

    /// Run both probes, reporting the first one that fails.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::NotInstalled` when the binary is missing and
    /// `RuntimeError::NotActive` when the daemon does not answer.
    pub fn ensure_ready(&self) -> Result<(), ConteneurError> {
        if !self.runtime_installed() {
            return Err(RuntimeError::NotInstalled {
                runtime: self.runtime.to_owned(),
            }
            .into());
        }
        if !self.runtime_active() {
            return Err(RuntimeError::NotActive {
                runtime: self.runtime.to_owned(),
            }
            .into());
        }
        Ok(())
    }
}
