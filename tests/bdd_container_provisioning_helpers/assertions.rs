//! Then-step assertions for container provisioning scenarios.

use rstest_bdd_macros::then;

use super::state::{CreateOutcome, FailureKind, ProvisioningState, StepResult};

fn outcome(provisioning_state: &ProvisioningState) -> StepResult<CreateOutcome> {
    provisioning_state
        .outcome
        .get()
        .ok_or_else(|| String::from("creation outcome should be set"))
}

fn commands(provisioning_state: &ProvisioningState) -> StepResult<Vec<String>> {
    provisioning_state
        .commands
        .get()
        .ok_or_else(|| String::from("captured commands should be set"))
}

fn expect_failure(provisioning_state: &ProvisioningState, expected: FailureKind) -> StepResult<()> {
    match outcome(provisioning_state)? {
        CreateOutcome::Failed { kind, .. } if kind == expected => Ok(()),
        CreateOutcome::Failed { kind, message } => Err(format!(
            "expected {expected:?} failure, got {kind:?}: {message}"
        )),
        CreateOutcome::Created(record) => Err(format!(
            "expected {expected:?} failure, got container {}",
            record.name
        )),
    }
}

#[then("container creation succeeds with image {image}")]
fn container_creation_succeeds(
    provisioning_state: &ProvisioningState,
    image: String,
) -> StepResult<()> {
    match outcome(provisioning_state)? {
        CreateOutcome::Created(record) if record.image == image => Ok(()),
        CreateOutcome::Created(record) => {
            Err(format!("expected image {image}, got {}", record.image))
        }
        CreateOutcome::Failed { message, .. } => {
            Err(format!("expected success, got failure: {message}"))
        }
    }
}

#[then("container creation fails with an invalid choice")]
fn container_creation_fails_invalid_choice(
    provisioning_state: &ProvisioningState,
) -> StepResult<()> {
    expect_failure(provisioning_state, FailureKind::InvalidChoice)
}

#[then("container creation fails with a runtime rejection")]
fn container_creation_fails_rejection(provisioning_state: &ProvisioningState) -> StepResult<()> {
    expect_failure(provisioning_state, FailureKind::CreateFailed)
}

#[then("container creation fails with a launch failure")]
fn container_creation_fails_launch(provisioning_state: &ProvisioningState) -> StepResult<()> {
    expect_failure(provisioning_state, FailureKind::LaunchFailed)
}

#[then("the runtime received {command}")]
fn runtime_received(provisioning_state: &ProvisioningState, command: String) -> StepResult<()> {
    let received = commands(provisioning_state)?;
    if received == [command.clone()] {
        return Ok(());
    }
    Err(format!("expected exactly [{command}], got {received:?}"))
}

#[then("no runtime command was issued")]
fn no_runtime_command_issued(provisioning_state: &ProvisioningState) -> StepResult<()> {
    let received = commands(provisioning_state)?;
    if received.is_empty() {
        return Ok(());
    }
    Err(format!("expected no commands, got {received:?}"))
}

#[then("every runtime command used the name {name}")]
fn every_command_used_name(provisioning_state: &ProvisioningState, name: String) -> StepResult<()> {
    let received = commands(provisioning_state)?;
    let needle = format!("--name {name} ");
    if received.len() < 2 {
        return Err(format!("expected repeated commands, got {received:?}"));
    }
    if received.iter().all(|line| line.contains(&needle)) {
        return Ok(());
    }
    Err(format!("expected every command to contain '{needle}', got {received:?}"))
}

#[then("the session counter is {count}")]
fn session_counter_is(provisioning_state: &ProvisioningState, count: u32) -> StepResult<()> {
    let session = provisioning_state
        .session
        .get()
        .ok_or_else(|| String::from("session state should be set"))?;
    let actual = session.containers_created();
    if actual == count {
        return Ok(());
    }
    Err(format!("expected counter {count}, got {actual}"))
}

#[then("the console reports the creation")]
fn console_reports_creation(provisioning_state: &ProvisioningState) -> StepResult<()> {
    let output = provisioning_state
        .console_output
        .get()
        .unwrap_or_default();
    if output.starts_with("Création du conteneur NOM-OS_A1") {
        return Ok(());
    }
    Err(format!("expected a creation message, got {output:?}"))
}
