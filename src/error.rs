//! Semantic error types for the conteneur application.
//!
//! Each concern gets its own `thiserror` enum describing the condition that
//! triggered the failure, so callers can pick the right operator-facing
//! message. Opaque errors (`eyre::Report`) are reserved for the binary
//! boundary.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found at the expected path.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path where the configuration file was expected.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised when the container runtime cannot be used at all.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime binary could not be found on the host.
    #[error("container runtime '{runtime}' is not installed")]
    NotInstalled {
        /// The runtime binary that was probed.
        runtime: String,
    },

    /// The runtime binary exists but its daemon did not answer.
    #[error("container runtime '{runtime}' is installed but not active")]
    NotActive {
        /// The runtime binary that was probed.
        runtime: String,
    },
}

/// Errors that can occur while provisioning a container.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The operator picked a key that is not in the image menu.
    #[error("invalid image choice: '{input}'")]
    InvalidChoice {
        /// The raw selection as typed by the operator.
        input: String,
    },

    /// The requested bind-mount volume is unusable.
    #[error("invalid volume: {reason}")]
    InvalidVolume {
        /// Why the volume was rejected.
        reason: String,
    },

    /// The runtime process could not be launched.
    #[error("failed to launch container runtime: {message}")]
    LaunchFailed {
        /// A description of the launch failure.
        message: String,
    },

    /// The runtime rejected the create request.
    #[error("failed to create container '{container}': {}", describe_exit(*.code))]
    CreateFailed {
        /// The container name that was requested.
        container: String,
        /// The exit code reported by the runtime, if any.
        code: Option<i32>,
    },
}

/// Errors that can occur while installing an SSH server in a container.
#[derive(Debug, Error)]
pub enum SshError {
    /// No container identifier was supplied.
    #[error("missing container identifier")]
    MissingContainer,

    /// No installation recipe exists for the requested family tag.
    #[error("unsupported image family: '{tag}'")]
    UnsupportedFamily {
        /// The family tag as supplied.
        tag: String,
    },

    /// The runtime process could not be launched for an exec step.
    #[error("failed to launch exec in container '{container}': {message}")]
    LaunchFailed {
        /// The target container.
        container: String,
        /// A description of the launch failure.
        message: String,
    },

    /// An exec step finished with a non-zero status.
    #[error("SSH setup step '{step}' failed in container '{container}': {}", describe_exit(*.code))]
    StepFailed {
        /// The target container.
        container: String,
        /// The script that failed.
        step: String,
        /// The exit code reported by the runtime, if any.
        code: Option<i32>,
    },
}

/// Errors that can occur while talking to the operator.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading from or writing to the terminal failed.
    #[error("console I/O failed: {message}")]
    Io {
        /// A description of the I/O failure.
        message: String,
    },

    /// The input stream closed while a prompt was waiting for an answer.
    #[error("input closed before an answer was given")]
    InputClosed,
}

impl From<std::io::Error> for ConsoleError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(
        || String::from("terminated by signal"),
        |value| format!("exit status {value}"),
    )
}

/// Top-level error type for the conteneur application.
#[derive(Debug, Error)]
pub enum ConteneurError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The container runtime is unavailable.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// An error occurred during container provisioning.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// An error occurred during SSH installation.
    #[error(transparent)]
    Ssh(#[from] SshError),

    /// An error occurred on the operator console.
    #[error(transparent)]
    Console(#[from] ConsoleError),
}

/// A specialised `Result` type for conteneur operations.
pub type Result<T> = std::result::Result<T, ConteneurError>;
