//! Behavioural step helpers for container provisioning scenarios.

mod assertions;

pub use state::{ProvisioningState, provisioning_state};
