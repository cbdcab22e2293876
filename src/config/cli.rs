//! Command-line argument definitions for conteneur.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface for conteneur.
#[derive(Debug, Parser)]
#[command(name = "conteneur")]
#[command(
    author,
    version,
    about = "Create containers and install SSH servers through a container runtime"
)]
pub struct Cli {
    /// Subcommand to execute. Without one, an interactive session starts.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Container runtime binary (e.g. docker, podman).
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    /// Disable coloured status lines.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log filter directive (e.g. debug, conteneur=trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the detected host platform.
    Os,

    /// Check that the runtime is installed and its daemon is active.
    Probe,

    /// List the image menu.
    Images,

    /// Create a container from an image menu key.
    Create(CreateArgs),

    /// Install and start an SSH server in a running container.
    Ssh(SshArgs),
}

/// Arguments for the `create` subcommand.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    /// Image menu key (see `conteneur images`).
    #[arg(long, required = true)]
    pub image: String,

    /// Host directory to bind-mount into the container.
    #[arg(long)]
    pub volume: Option<String>,
}

/// Arguments for the `ssh` subcommand.
#[derive(Debug, Parser)]
pub struct SshArgs {
    /// Container ID or name.
    #[arg(required = true)]
    pub container: String,

    /// Image family tag (debian, ubuntu, fedora, rockylinux).
    #[arg(long, required = true)]
    pub family: String,
}
