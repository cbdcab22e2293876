//! Shared behavioural-test state for SSH installation scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Step result type for SSH installation BDD tests.
pub type StepResult<T> = Result<T, String>;

/// Categorised outcome of an installation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Every recipe step succeeded.
    Installed,
    /// The family tag had no recipe.
    UnsupportedFamily,
    /// The container identifier was blank.
    MissingContainer,
    /// A recipe step exited non-zero.
    StepFailed,
    /// Any other failure kind.
    Other,
}

/// Shared scenario state for SSH installation behavioural tests.
#[derive(Default, ScenarioState)]
pub struct SshState {
    /// One-based index of the exec step that fails, if any.
    pub(crate) failing_step: Slot<Option<usize>>,

    /// Exit status reported by the failing step.
    pub(crate) failing_code: Slot<i32>,

    /// Command lines received by the runtime, in order.
    pub(crate) commands: Slot<Vec<String>>,

    /// Outcome of the installation attempt.
    pub(crate) outcome: Slot<InstallOutcome>,

    /// Everything written to the console.
    pub(crate) console_output: Slot<String>,
}

/// Fixture providing fresh state for each SSH installation scenario.
#[fixture]
pub fn ssh_state() -> SshState {
    let state = SshState::default();
    state.failing_step.set(None);
    state.failing_code.set(0);
    state.commands.set(Vec::new());
    state
}
