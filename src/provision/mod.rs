//! Container provisioning.
//!
//! Turns a menu selection and an optional volume into exactly one runtime
//! invocation:
//!
//! ```text
//! run -d --name <name> --network <network> [-v <host>:<target>] <image> sleep infinity
//! ```
//!
//! The container name is fixed by configuration rather than generated per
//! call. Creating twice in one session therefore asks the runtime for the
//! same name twice and the second attempt is rejected by the runtime as a
//! duplicate. This matches the single-container-per-session usage the tool
//! was built for.

mod catalog;
mod state;
mod volume;

use std::io::{BufRead, Write};

use camino::Utf8PathBuf;

pub use catalog::{ImageCatalog, ImageChoice};
pub use state::SessionState;
pub use volume::VolumeSpec;

use crate::config::AppConfig;
use crate::console::Console;
use crate::error::{ConteneurError, ProvisionError};
use crate::runtime::{CommandRunner, Invocation};
use crate::ssh::ImageFamily;

/// Default container name used for every creation.
pub const DEFAULT_CONTAINER_NAME: &str = "NOM-OS_A1";

/// Default network the container joins.
pub const DEFAULT_NETWORK: &str = "bridge";

/// Default mount point for the bind-mounted volume.
pub const DEFAULT_VOLUME_TARGET: &str = "/data";

/// Default runtime binary.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Keep-alive command run in the foreground of every container.
const KEEP_ALIVE: [&str; 2] = ["sleep", "infinity"];

/// Values that shape the `run` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionSettings {
    /// Runtime binary.
    pub runtime: String,
    /// Name given to the created container.
    pub container_name: String,
    /// Network the container joins.
    pub network: String,
    /// Mount point inside the container for the optional volume.
    pub volume_target: Utf8PathBuf,
}

impl ProvisionSettings {
    /// Derive settings from the merged application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            runtime: config.runtime_binary().to_owned(),
            container_name: config.container.name.clone(),
            network: config.container.network.clone(),
            volume_target: config.container.volume_target.clone(),
        }
    }
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self {
            runtime: String::from(DEFAULT_RUNTIME),
            container_name: String::from(DEFAULT_CONTAINER_NAME),
            network: String::from(DEFAULT_NETWORK),
            volume_target: Utf8PathBuf::from(DEFAULT_VOLUME_TARGET),
        }
    }
}

/// A container the runtime accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    /// Container name as passed to `--name`.
    pub name: String,
    /// Image the container was created from.
    pub image: String,
    /// Family of that image.
    pub family: ImageFamily,
}

/// Creates containers through a runtime.
pub struct Provisioner<'a, R: CommandRunner> {
    runner: &'a R,
    settings: &'a ProvisionSettings,
    catalog: ImageCatalog,
}

impl<'a, R: CommandRunner> Provisioner<'a, R> {
    /// Create a provisioner that executes through `runner`.
    #[must_use]
    pub const fn new(runner: &'a R, settings: &'a ProvisionSettings) -> Self {
        Self {
            runner,
            settings,
            catalog: ImageCatalog,
        }
    }

    /// The image menu this provisioner accepts keys from.
    #[must_use]
    pub const fn catalog(&self) -> ImageCatalog {
        self.catalog
    }

    /// Compose the `run` invocation for `image`.
    #[must_use]
    pub fn run_invocation(&self, image: &str, volume: Option<&VolumeSpec>) -> Invocation {
        let base = Invocation::new(&self.settings.runtime).args([
            "run",
            "-d",
            "--name",
            self.settings.container_name.as_str(),
            "--network",
            self.settings.network.as_str(),
        ]);
        let mounted = match volume {
            Some(spec) => base
                .arg("-v")
                .arg(spec.bind_clause(&self.settings.volume_target)),
            None => base,
        };
        mounted.arg(image).args(KEEP_ALIVE)
    }

    /// Resolve `selection` against the menu, telling the operator when it is
    /// not a menu key.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::InvalidChoice` for unknown keys and
    /// `ConsoleError` if the rejection cannot be written.
    pub fn select<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
        selection: &str,
    ) -> Result<&'static ImageChoice, ConteneurError> {
        match self.catalog.choose(selection) {
            Ok(choice) => Ok(choice),
            Err(error) => {
                console.error(&format!("Choix invalide : '{}'.", selection.trim()))?;
                Err(error.into())
            }
        }
    }

    /// Create a container from the menu entry selected by `selection`.
    ///
    /// On success the session counter is incremented exactly once. On any
    /// failure the counter is left untouched, and an invalid selection
    /// issues no command at all.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::InvalidChoice` for unknown menu keys,
    /// `ProvisionError::LaunchFailed` if the runtime cannot be launched and
    /// `ProvisionError::CreateFailed` when it exits non-zero. Console write
    /// failures before the runtime call are reported as `ConsoleError`; the
    /// success line is best effort.
    pub fn create<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
        session: &mut SessionState,
        selection: &str,
        volume: Option<&VolumeSpec>,
    ) -> Result<ContainerRecord, ConteneurError> {
        let choice = self.select(console, selection)?;

        let invocation = self.run_invocation(choice.image, volume);
        tracing::debug!(command = %invocation, "creating container");
        let status = self
            .runner
            .run(&invocation)
            .map_err(|error| ProvisionError::LaunchFailed {
                message: error.to_string(),
            })?;
        if !status.success() {
            tracing::warn!(code = ?status.code(), "container creation rejected");
            return Err(ProvisionError::CreateFailed {
                container: self.settings.container_name.clone(),
                code: status.code(),
            }
            .into());
        }

        session.record_creation();
        // The container exists from here on, so a console failure must not
        // turn the creation into an error.
        if let Err(error) = console.success(&format!(
            "Création du conteneur {} à partir de l'image {} réussie.",
            self.settings.container_name, choice.image
        )) {
            tracing::warn!(%error, "could not report container creation");
        }
        tracing::info!(
            container = %self.settings.container_name,
            image = choice.image,
            created = session.containers_created(),
            "container created"
        );

        Ok(ContainerRecord {
            name: self.settings.container_name.clone(),
            image: choice.image.to_owned(),
            family: choice.family,
        })
    }
}
