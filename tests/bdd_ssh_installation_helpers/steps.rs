//! Given/when step definitions for SSH installation scenarios.

use std::io::{self, Cursor};
use std::sync::{Arc, Mutex};

use conteneur::console::Console;
use conteneur::error::{ConteneurError, SshError};
use conteneur::runtime::{CommandRunner, CommandStatus, Invocation};
use conteneur::ssh::{ImageFamily, SshInstaller};
use mockall::mock;
use rstest_bdd_macros::{given, when};

use super::state::{InstallOutcome, SshState, StepResult};

mock! {
    Runner {}

    impl CommandRunner for Runner {
        fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus>;
    }
}

#[given("the runtime accepts every exec step")]
fn runtime_accepts_every_exec_step(ssh_state: &SshState) {
    ssh_state.failing_step.set(None);
}

#[given("exec step {step} exits with status {code}")]
fn exec_step_exits_with(ssh_state: &SshState, step: usize, code: i32) {
    ssh_state.failing_step.set(Some(step));
    ssh_state.failing_code.set(code);
}

#[when("SSH is installed in {container} for family {family}")]
fn ssh_is_installed(ssh_state: &SshState, container: String, family: String) -> StepResult<()> {
    let target = if container == "a blank container" {
        String::from("   ")
    } else {
        container
    };
    install_from_state(ssh_state, &target, &family)
}

fn setup_mock_runner(
    failing_step: Option<usize>,
    failing_code: i32,
    captured: &Arc<Mutex<Vec<String>>>,
) -> MockRunner {
    let captured_for_closure = Arc::clone(captured);
    let mut runner = MockRunner::new();
    runner.expect_run().returning(move |invocation| {
        let position = captured_for_closure.lock().map_or(0, |mut locked| {
            locked.push(invocation.command_line());
            locked.len()
        });
        if failing_step == Some(position) {
            return Ok(CommandStatus::exited(failing_code));
        }
        Ok(CommandStatus::exited(0))
    });
    runner
}

fn install_from_state(ssh_state: &SshState, container: &str, family: &str) -> StepResult<()> {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let runner = setup_mock_runner(
        ssh_state.failing_step.get().flatten(),
        ssh_state.failing_code.get().unwrap_or(0),
        &captured,
    );
    let mut console = Console::new(Cursor::new(Vec::new()), Vec::new(), false);

    let result = family
        .parse::<ImageFamily>()
        .map_err(ConteneurError::from)
        .and_then(|parsed| SshInstaller::new(&runner, "docker").install(&mut console, container, parsed));

    ssh_state.outcome.set(classify(&result));
    ssh_state.commands.set(
        captured
            .lock()
            .map_err(|_| String::from("captured commands lock poisoned"))?
            .clone(),
    );
    ssh_state
        .console_output
        .set(String::from_utf8(console.into_output()).map_err(|error| error.to_string())?);
    Ok(())
}

fn classify(result: &Result<(), ConteneurError>) -> InstallOutcome {
    match result {
        Ok(()) => InstallOutcome::Installed,
        Err(ConteneurError::Ssh(SshError::UnsupportedFamily { .. })) => {
            InstallOutcome::UnsupportedFamily
        }
        Err(ConteneurError::Ssh(SshError::MissingContainer)) => InstallOutcome::MissingContainer,
        Err(ConteneurError::Ssh(SshError::StepFailed { .. })) => InstallOutcome::StepFailed,
        Err(_) => InstallOutcome::Other,
    }
}
