//! `conteneur` application entry point.
//!
//! Without a subcommand the binary runs the interactive session on the
//! terminal. Subcommands expose each step on its own for scripting; they exit
//! non-zero on failure. `eyre` is used only here, at the application
//! boundary, to turn domain errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/conteneur/config.toml` or path from `CONTENEUR_CONFIG_PATH`)
//! 3. Environment variables (`CONTENEUR_*`)
//! 4. Command-line arguments

use std::io::{self, BufRead, Write};

use clap::Parser;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;

use conteneur::config::{AppConfig, Cli, Commands, CreateArgs, SshArgs, load_config};
use conteneur::console::{Console, color_enabled};
use conteneur::error::Result as ConteneurResult;
use conteneur::logging;
use conteneur::platform::Platform;
use conteneur::provision::{ImageCatalog, ProvisionSettings, Provisioner, SessionState, VolumeSpec};
use conteneur::runtime::{CommandRunner, RuntimeProber, SystemRunner};
use conteneur::session::InteractiveSession;
use conteneur::ssh::{ImageFamily, SshInstaller};

/// Application entry point.
///
/// Parses the CLI, loads configuration, installs the diagnostic subscriber
/// and dispatches to the requested command.
fn main() -> EyreResult<()> {
    // Parse CLI first (for subcommand dispatch and global options).
    let cli = Cli::parse();

    // The CLI is passed to extract --config, --runtime, --no-color and --log-level.
    let config = load_config(&cli).map_err(Report::from)?;
    logging::init(&config.logging);

    let color = color_enabled(config.console.color, &DefaultEnv::new());
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), color);

    run(&cli, &config, &mut console).map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`.
fn run<I: BufRead, O: Write>(
    cli: &Cli,
    config: &AppConfig,
    console: &mut Console<I, O>,
) -> ConteneurResult<()> {
    let runner = SystemRunner;
    let settings = ProvisionSettings::from_config(config);

    match &cli.command {
        None => run_session(&runner, &settings, console),
        Some(Commands::Os) => Ok(console.line(Platform::detect().as_str())?),
        Some(Commands::Probe) => probe_runtime(&runner, &settings, console),
        Some(Commands::Images) => list_images(console),
        Some(Commands::Create(args)) => create_container(&runner, &settings, console, args),
        Some(Commands::Ssh(args)) => install_ssh(&runner, &settings, console, args),
    }
}

/// Run the interactive session on the terminal.
fn run_session<R: CommandRunner, I: BufRead, O: Write>(
    runner: &R,
    settings: &ProvisionSettings,
    console: &mut Console<I, O>,
) -> ConteneurResult<()> {
    let mut session = InteractiveSession::new(runner, settings, Platform::detect());
    let outcome = session.run(console)?;
    tracing::debug!(?outcome, "interactive session finished");
    Ok(())
}

/// Report whether the runtime is installed and active.
fn probe_runtime<R: CommandRunner, I: BufRead, O: Write>(
    runner: &R,
    settings: &ProvisionSettings,
    console: &mut Console<I, O>,
) -> ConteneurResult<()> {
    RuntimeProber::new(runner, &settings.runtime).ensure_ready()?;
    console.success(&format!("{} est installé et actif.", settings.runtime))?;
    Ok(())
}

/// Print the image menu.
fn list_images<I: BufRead, O: Write>(console: &mut Console<I, O>) -> ConteneurResult<()> {
    for line in ImageCatalog.menu_lines() {
        console.line(&line)?;
    }
    Ok(())
}

/// Create one container from a menu key.
fn create_container<R: CommandRunner, I: BufRead, O: Write>(
    runner: &R,
    settings: &ProvisionSettings,
    console: &mut Console<I, O>,
    args: &CreateArgs,
) -> ConteneurResult<()> {
    let volume = args.volume.as_deref().map(VolumeSpec::new).transpose()?;
    RuntimeProber::new(runner, &settings.runtime).ensure_ready()?;

    let mut state = SessionState::new();
    let record =
        Provisioner::new(runner, settings).create(console, &mut state, &args.image, volume.as_ref())?;
    tracing::debug!(container = %record.name, family = %record.family, "created from CLI");
    Ok(())
}

/// Install SSH in an existing container.
fn install_ssh<R: CommandRunner, I: BufRead, O: Write>(
    runner: &R,
    settings: &ProvisionSettings,
    console: &mut Console<I, O>,
    args: &SshArgs,
) -> ConteneurResult<()> {
    let family: ImageFamily = args.family.parse()?;
    RuntimeProber::new(runner, &settings.runtime).ensure_ready()?;
    SshInstaller::new(runner, &settings.runtime).install(console, &args.container, family)
}
