//! Container creation helper driven through a container runtime.
//!
//! `conteneur` detects the host operating system, checks that a container
//! runtime such as Docker or Podman is installed and active, then creates
//! containers from a small image menu and can install an SSH server inside
//! them. All work is delegated to the runtime binary through process
//! invocations; nothing here talks to the runtime's API directly.
//!
//! # Architecture
//!
//! Every process launch goes through the [`runtime::CommandRunner`] trait.
//! The binary uses [`runtime::SystemRunner`]; tests substitute recording or
//! mocked runners so the composed invocations can be asserted exactly.
//!
//! # Modules
//!
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`console`]: Coloured status lines and operator prompts
//! - [`error`]: Semantic error types for the application
//! - [`logging`]: Diagnostic subscriber setup
//! - [`platform`]: Host operating system detection
//! - [`provision`]: Image menu and container creation
//! - [`runtime`]: Invocation model and runtime probes
//! - [`session`]: The interactive flow
//! - [`ssh`]: SSH server installation recipes

pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod platform;
pub mod provision;
pub mod runtime;
pub mod session;
pub mod ssh;
