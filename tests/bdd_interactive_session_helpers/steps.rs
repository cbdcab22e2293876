//! Given/when step definitions for interactive session scenarios.

use std::io::{self, Cursor};
use std::sync::{Arc, Mutex};

use conteneur::console::Console;
use conteneur::platform::Platform;
use conteneur::provision::ProvisionSettings;
use conteneur::runtime::{CommandRunner, CommandStatus, Invocation};
use conteneur::session::InteractiveSession;
use mockall::mock;
use rstest_bdd_macros::{given, when};

use super::state::{RuntimeBehaviour, SessionScenarioState, StepResult};

mock! {
    Runner {}

    impl CommandRunner for Runner {
        fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus>;
    }
}

#[given("the runtime accepts every command")]
fn runtime_accepts_every_command(session_scenario_state: &SessionScenarioState) {
    session_scenario_state
        .behaviour
        .set(RuntimeBehaviour::Healthy);
}

#[given("the runtime binary is missing")]
fn runtime_binary_missing(session_scenario_state: &SessionScenarioState) {
    session_scenario_state
        .behaviour
        .set(RuntimeBehaviour::Missing);
}

#[given("the runtime daemon does not answer")]
fn runtime_daemon_silent(session_scenario_state: &SessionScenarioState) {
    session_scenario_state
        .behaviour
        .set(RuntimeBehaviour::DaemonStopped);
}

#[given("the operator answers {answers}")]
fn operator_answers(session_scenario_state: &SessionScenarioState, answers: String) {
    let lines: String = answers
        .split(',')
        .map(|answer| format!("{}\n", answer.trim()))
        .collect();
    session_scenario_state.input.set(lines);
}

fn setup_mock_runner(behaviour: RuntimeBehaviour, captured: &Arc<Mutex<Vec<String>>>) -> MockRunner {
    let captured_for_closure = Arc::clone(captured);
    let mut runner = MockRunner::new();
    runner.expect_run().returning(move |invocation| {
        if let Ok(mut locked) = captured_for_closure.lock() {
            locked.push(invocation.command_line());
        }
        let is_info = invocation.arguments().first().is_some_and(|arg| arg == "info");
        match behaviour {
            RuntimeBehaviour::Missing => Err(io::Error::from(io::ErrorKind::NotFound)),
            RuntimeBehaviour::DaemonStopped if is_info => Ok(CommandStatus::exited(1)),
            RuntimeBehaviour::Healthy | RuntimeBehaviour::DaemonStopped => {
                Ok(CommandStatus::exited(0))
            }
        }
    });
    runner
}

#[when("the interactive session runs")]
fn interactive_session_runs(session_scenario_state: &SessionScenarioState) -> StepResult<()> {
    let behaviour = session_scenario_state
        .behaviour
        .get()
        .unwrap_or(RuntimeBehaviour::Healthy);
    let input = session_scenario_state.input.get().unwrap_or_default();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let runner = setup_mock_runner(behaviour, &captured);
    let settings = ProvisionSettings::default();
    let mut console = Console::new(Cursor::new(input.into_bytes()), Vec::new(), false);

    let outcome = InteractiveSession::new(&runner, &settings, Platform::Linux)
        .run(&mut console)
        .map_err(|error| format!("session should finish: {error}"))?;

    session_scenario_state.outcome.set(outcome);
    session_scenario_state.commands.set(
        captured
            .lock()
            .map_err(|_| String::from("captured commands lock poisoned"))?
            .clone(),
    );
    session_scenario_state
        .console_output
        .set(String::from_utf8(console.into_output()).map_err(|error| error.to_string())?);
    Ok(())
}
