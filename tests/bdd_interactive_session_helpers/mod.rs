//! Behavioural step helpers for interactive session scenarios.

mod state;
mod steps;

pub use state::{SessionScenarioState, session_scenario_state};
