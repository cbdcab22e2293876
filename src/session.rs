//! Interactive operator session.
//!
//! Ties the components together: platform banner, runtime gate, then a loop
//! of menu selection, container creation and optional SSH installation until
//! the operator declines to create another container. Domain failures are
//! reported on the console and the loop carries on; only console failures
//! end the session early.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::{ConsoleError, ConteneurError, ProvisionError, RuntimeError, SshError};
use crate::platform::Platform;
use crate::provision::{ContainerRecord, ProvisionSettings, Provisioner, SessionState, VolumeSpec};
use crate::runtime::{CommandRunner, RuntimeProber};
use crate::ssh::SshInstaller;

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The runtime binary could not be found; nothing was attempted.
    RuntimeMissing,
    /// The runtime is installed but its daemon did not answer.
    RuntimeInactive,
    /// The operator finished the creation loop.
    Completed {
        /// Containers created during the session.
        containers_created: u32,
    },
}

/// One interactive run of the tool.
pub struct InteractiveSession<'a, R: CommandRunner> {
    runner: &'a R,
    settings: &'a ProvisionSettings,
    platform: Platform,
    state: SessionState,
}

impl<'a, R: CommandRunner> InteractiveSession<'a, R> {
    /// Create a session that drives `runner` with `settings`.
    #[must_use]
    pub const fn new(runner: &'a R, settings: &'a ProvisionSettings, platform: Platform) -> Self {
        Self {
            runner,
            settings,
            platform,
            state: SessionState::new(),
        }
    }

    /// Session counters so far.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run the session to completion.
    ///
    /// Closing the input stream at any prompt ends the loop as if the
    /// operator had declined to continue.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` when the console cannot be written to or read
    /// from. Every other failure is reported on the console instead.
    pub fn run<I: BufRead, O: Write>(
        &mut self,
        console: &mut Console<I, O>,
    ) -> Result<SessionOutcome, ConteneurError> {
        console.info(&format!(
            "Système d'exploitation détecté : {}",
            self.platform
        ))?;

        if let Some(outcome) = self.gate(console)? {
            return Ok(outcome);
        }

        loop {
            match self.round(console) {
                Ok(true) => {}
                Ok(false) | Err(ConteneurError::Console(ConsoleError::InputClosed)) => break,
                Err(error) => return Err(error),
            }
        }

        let created = self.state.containers_created();
        console.info(&format!(
            "{created} conteneur(s) créé(s) pendant cette session."
        ))?;
        Ok(SessionOutcome::Completed {
            containers_created: created,
        })
    }

    /// Stop early when the runtime is missing or inactive.
    fn gate<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
    ) -> Result<Option<SessionOutcome>, ConteneurError> {
        let runtime = self.settings.runtime.as_str();
        let prober = RuntimeProber::new(self.runner, runtime);

        if !prober.runtime_installed() {
            console.error(&format!("{runtime} n'est pas installé sur ce système."))?;
            return Ok(Some(SessionOutcome::RuntimeMissing));
        }
        if !prober.runtime_active() {
            console.warn(&format!(
                "{runtime} est installé mais n'est pas actif. Démarrez le service puis relancez."
            ))?;
            return Ok(Some(SessionOutcome::RuntimeInactive));
        }

        console.success(&format!("{runtime} est installé et actif."))?;
        Ok(None)
    }

    /// One pass through the menu. Returns whether the operator wants another.
    fn round<I: BufRead, O: Write>(
        &mut self,
        console: &mut Console<I, O>,
    ) -> Result<bool, ConteneurError> {
        let provisioner = Provisioner::new(self.runner, self.settings);

        console.line("Images disponibles :")?;
        for line in provisioner.catalog().menu_lines() {
            console.line(&line)?;
        }
        let selection = console.prompt("Votre choix : ")?;

        // A key that cannot be created gets no volume question.
        match provisioner.select(console, &selection) {
            Ok(_) => self.provision(console, &provisioner, &selection)?,
            Err(error) => report(console, error)?,
        }

        Ok(console.confirm("Créer un autre conteneur ?")?)
    }

    /// Ask for a volume, create the container, then offer SSH.
    fn provision<I: BufRead, O: Write>(
        &mut self,
        console: &mut Console<I, O>,
        provisioner: &Provisioner<'_, R>,
        selection: &str,
    ) -> Result<(), ConteneurError> {
        let volume = match ask_volume(console) {
            Ok(volume) => volume,
            Err(error) => return report(console, error),
        };
        match provisioner.create(console, &mut self.state, selection, volume.as_ref()) {
            Ok(record) => self.offer_ssh(console, &record),
            Err(error) => report(console, error),
        }
    }

    fn offer_ssh<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
        record: &ContainerRecord,
    ) -> Result<(), ConteneurError> {
        let question = format!("Installer SSH dans le conteneur {} ?", record.name);
        if !console.confirm(&question)? {
            return Ok(());
        }

        let installer = SshInstaller::new(self.runner, &self.settings.runtime);
        match installer.install(console, &record.name, record.family) {
            Ok(()) => Ok(()),
            Err(error) => report(console, error),
        }
    }
}

/// Ask whether to mount a volume and, if so, read the host path.
fn ask_volume<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
) -> Result<Option<VolumeSpec>, ConteneurError> {
    if !console.confirm("Monter un volume ?")? {
        return Ok(None);
    }
    let path = console.prompt("Chemin du dossier hôte : ")?;
    Ok(Some(VolumeSpec::new(&path)?))
}

/// Show a domain failure to the operator. Console failures propagate.
fn report<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    error: ConteneurError,
) -> Result<(), ConteneurError> {
    match error {
        ConteneurError::Console(_) => Err(error),
        // Already shown by the provisioner.
        ConteneurError::Provision(ProvisionError::InvalidChoice { .. }) => Ok(()),
        other => {
            tracing::warn!(error = %other, "operation failed");
            console.error(&operator_message(&other))?;
            Ok(())
        }
    }
}

/// The console wording for a failure. Logs keep the `Display` text.
fn operator_message(error: &ConteneurError) -> String {
    match error {
        ConteneurError::Provision(ProvisionError::InvalidChoice { input }) => {
            format!("Choix invalide : '{input}'.")
        }
        ConteneurError::Provision(ProvisionError::InvalidVolume { .. }) => {
            String::from("Volume invalide : le chemin du dossier hôte est vide.")
        }
        ConteneurError::Provision(ProvisionError::LaunchFailed { message }) => {
            format!("Impossible de lancer le runtime : {message}.")
        }
        ConteneurError::Provision(ProvisionError::CreateFailed { container, code }) => {
            format!(
                "Échec de la création du conteneur {container} ({}).",
                exit_wording(*code)
            )
        }
        ConteneurError::Ssh(SshError::MissingContainer) => {
            String::from("Identifiant de conteneur manquant.")
        }
        ConteneurError::Ssh(SshError::UnsupportedFamily { tag }) => {
            format!("Famille d'image non prise en charge : '{tag}'.")
        }
        ConteneurError::Ssh(SshError::LaunchFailed { container, message }) => {
            format!("Impossible de lancer exec dans le conteneur {container} : {message}.")
        }
        ConteneurError::Ssh(SshError::StepFailed {
            container,
            step,
            code,
        }) => format!(
            "L'étape SSH '{step}' a échoué dans le conteneur {container} ({}).",
            exit_wording(*code)
        ),
        ConteneurError::Runtime(RuntimeError::NotInstalled { runtime }) => {
            format!("{runtime} n'est pas installé sur ce système.")
        }
        ConteneurError::Runtime(RuntimeError::NotActive { runtime }) => {
            format!("{runtime} est installé mais n'est pas actif.")
        }
        ConteneurError::Config(_) | ConteneurError::Console(_) => error.to_string(),
    }
}

fn exit_wording(code: Option<i32>) -> String {
    code.map_or_else(
        || String::from("interrompu par un signal"),
        |value| format!("code de sortie {value}"),
    )
}
