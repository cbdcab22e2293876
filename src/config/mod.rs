//! Configuration system for conteneur.
//!
//! This module provides the configuration structures, the CLI definitions and
//! the layered loader. Precedence, lowest to highest: application defaults,
//! configuration file, `CONTENEUR_*` environment variables, command-line
//! flags.
//!
//! The configuration file is expected at `~/.config/conteneur/config.toml` by
//! default. A `.conteneur.toml` in the working or home directory is also
//! picked up.
//!
//! # Example Configuration
//!
//! ```toml
//! runtime = "podman"
//!
//! [container]
//! name = "NOM-OS_A1"
//! network = "bridge"
//! volume_target = "/data"
//!
//! [console]
//! color = true
//!
//! [logging]
//! level = "warn"
//! ```

mod cli;
mod loader;
mod types;


pub use cli::{Cli, Commands, CreateArgs, SshArgs};
pub use loader::{env_var_names, load_config};
pub use types::{AppConfig, ConsoleConfig, ContainerConfig, LoggingConfig};
