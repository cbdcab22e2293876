//! Behavioural step helpers for SSH installation scenarios.

mod state;
mod steps;

pub use state::{SshState, ssh_state};
