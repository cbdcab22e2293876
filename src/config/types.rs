//! Configuration data types for conteneur.

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::provision::{
    DEFAULT_CONTAINER_NAME, DEFAULT_NETWORK, DEFAULT_RUNTIME, DEFAULT_VOLUME_TARGET,
};

/// Settings applied to every created container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Name passed to `--name`. The same name is reused for every creation.
    pub name: String,

    /// Network passed to `--network`.
    pub network: String,

    /// Mount point of the optional bind-mounted volume.
    pub volume_target: Utf8PathBuf,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_CONTAINER_NAME),
            network: String::from(DEFAULT_NETWORK),
            volume_target: Utf8PathBuf::from(DEFAULT_VOLUME_TARGET),
        }
    }
}

/// Console rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Colour status lines. `NO_COLOR` still wins when set.
    pub color: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Diagnostic logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `conteneur=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
        }
    }
}

/// Root application configuration.
///
/// This structure is loaded from configuration files, environment variables,
/// and command-line arguments with layered precedence. The precedence order
/// (lowest to highest) is: defaults, configuration file, environment variables,
/// command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `CONTENEUR_CONFIG_PATH` environment variable
/// 2. `.conteneur.toml` in the current working directory
/// 3. `.conteneur.toml` in the home directory
/// 4. `~/.config/conteneur/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "CONTENEUR",
    post_merge_hook,
    discovery(
        app_name = "conteneur",
        env_var = "CONTENEUR_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".conteneur.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// Container runtime binary. Defaults to `docker` when unset.
    pub runtime: Option<String>,

    /// Container settings.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub container: ContainerConfig,

    /// Console settings.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub console: ConsoleConfig,

    /// Logging settings.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// The runtime binary to invoke.
    #[must_use]
    pub fn runtime_binary(&self) -> &str {
        self.runtime
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_RUNTIME)
    }

    /// Check values that would produce unusable runtime invocations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the runtime, container name or
    /// network is blank, or when the volume target is not an absolute path.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.runtime.as_deref().is_some_and(|value| value.trim().is_empty()) {
            return Err(invalid("runtime", "must not be empty"));
        }
        if self.container.name.trim().is_empty() {
            return Err(invalid("container.name", "must not be empty"));
        }
        if self.container.network.trim().is_empty() {
            return Err(invalid("container.network", "must not be empty"));
        }
        if !self.container.volume_target.as_str().starts_with('/') {
            return Err(invalid(
                "container.volume_target",
                "must be an absolute path inside the container",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::error::ConteneurError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
    .into()
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        // Strip whitespace picked up from files or the environment.
        if let Some(runtime) = self.runtime.as_mut() {
            *runtime = runtime.trim().to_owned();
        }
        self.container.name = self.container.name.trim().to_owned();
        self.container.network = self.container.network.trim().to_owned();
        Ok(())
    }
}
