//! Shared behavioural-test state for interactive session scenarios.

use conteneur::session::SessionOutcome;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Step result type for interactive session BDD tests.
pub type StepResult<T> = Result<T, String>;

/// How the mocked runtime behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeBehaviour {
    /// Every command exits zero.
    Healthy,
    /// The binary cannot be found.
    Missing,
    /// `info` exits non-zero; everything else succeeds.
    DaemonStopped,
}

/// Shared scenario state for interactive session behavioural tests.
#[derive(Default, ScenarioState)]
pub struct SessionScenarioState {
    /// Behaviour of the mocked runtime.
    pub(crate) behaviour: Slot<RuntimeBehaviour>,

    /// Operator input, one answer per line.
    pub(crate) input: Slot<String>,

    /// Command lines received by the runtime, in order.
    pub(crate) commands: Slot<Vec<String>>,

    /// How the session ended.
    pub(crate) outcome: Slot<SessionOutcome>,

    /// Everything written to the console.
    pub(crate) console_output: Slot<String>,
}

/// Fixture providing fresh state for each interactive session scenario.
#[fixture]
pub fn session_scenario_state() -> SessionScenarioState {
    let state = SessionScenarioState::default();
    state.behaviour.set(RuntimeBehaviour::Healthy);
    state.input.set(String::new());
    state
}
