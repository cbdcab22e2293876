//! SSH server installation inside a running container.
//!
//! Each image family has a fixed recipe of shell scripts. Every script is run
//! as `exec -it <container> bash -c '<script>'`, in order, without waiting for
//! the daemon to become reachable afterwards. The first failing step aborts
//! the remaining ones.

mod family;

use std::io::{BufRead, Write};

pub use family::ImageFamily;

use crate::console::Console;
use crate::error::{ConteneurError, SshError};
use crate::runtime::{CommandRunner, Invocation};

const DEBIAN_RECIPE: &[&str] = &[
    "apt update && apt install -y openssh-server",
    "service ssh start",
];

const FEDORA_RECIPE: &[&str] = &[
    "dnf install -y openssh-server",
    "ssh-keygen -A",
    "/usr/sbin/sshd",
];

/// The ordered scripts that install and start `sshd` for `family`.
#[must_use]
pub const fn recipe(family: ImageFamily) -> &'static [&'static str] {
    match family {
        ImageFamily::Debian => DEBIAN_RECIPE,
        ImageFamily::Fedora => FEDORA_RECIPE,
    }
}

/// Installs and starts an SSH server in containers through a runtime.
pub struct SshInstaller<'a, R: CommandRunner> {
    runner: &'a R,
    runtime: &'a str,
}

impl<'a, R: CommandRunner> SshInstaller<'a, R> {
    /// Create an installer that executes through `runner`.
    #[must_use]
    pub const fn new(runner: &'a R, runtime: &'a str) -> Self {
        Self { runner, runtime }
    }

    /// The exec invocations the installer issues for `container`, in order.
    #[must_use]
    pub fn invocations(&self, container: &str, family: ImageFamily) -> Vec<Invocation> {
        recipe(family)
            .iter()
            .map(|script| {
                Invocation::new(self.runtime)
                    .args(["exec", "-it", container, "bash", "-c"])
                    .script(*script)
            })
            .collect()
    }

    /// Install and start `sshd` in `container`.
    ///
    /// # Errors
    ///
    /// Returns `SshError::MissingContainer` for an empty identifier,
    /// `SshError::LaunchFailed` if the runtime cannot be launched and
    /// `SshError::StepFailed` for the first step that exits non-zero.
    /// Console write failures are reported as `ConsoleError`.
    pub fn install<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
        container: &str,
        family: ImageFamily,
    ) -> Result<(), ConteneurError> {
        let trimmed = container.trim();
        if trimmed.is_empty() {
            return Err(SshError::MissingContainer.into());
        }

        console.info(&format!(
            "Installation de SSH dans le conteneur {trimmed} ({family})..."
        ))?;

        for (invocation, step) in self
            .invocations(trimmed, family)
            .iter()
            .zip(recipe(family))
        {
            tracing::debug!(command = %invocation, "running SSH setup step");
            let status = self
                .runner
                .run(invocation)
                .map_err(|error| SshError::LaunchFailed {
                    container: trimmed.to_owned(),
                    message: error.to_string(),
                })?;
            if !status.success() {
                tracing::warn!(step, code = ?status.code(), "SSH setup step failed");
                return Err(SshError::StepFailed {
                    container: trimmed.to_owned(),
                    step: (*step).to_owned(),
                    code: status.code(),
                }
                .into());
            }
        }

        console.success(&format!(
            "SSH installé et démarré dans le conteneur {trimmed}."
        ))?;
        Ok(())
    }
}
