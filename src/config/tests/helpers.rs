//! Shared fixtures and helper functions for config tests.

use crate::config::AppConfig;
use ortho_config::MergeComposer;
use rstest::fixture;
use std::sync::Arc;

/// Fixture providing an `AppConfig` parsed from a full TOML example.
#[fixture]
pub fn app_config_from_full_toml() -> AppConfig {
    let toml = r#"
        runtime = "podman"

        [container]
        name = "atelier"
        network = "host"
        volume_target = "/srv/partage"

        [console]
        color = false

        [logging]
        level = "debug"
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Fixture providing an `AppConfig` parsed from a minimal TOML example.
#[fixture]
pub fn app_config_from_partial_toml() -> AppConfig {
    let toml = r#"
        [container]
        network = "none"
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Helper: Creates a `MergeComposer` with defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(AppConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `AppConfig`.
pub fn merge_config(composer: MergeComposer) -> Result<AppConfig, Arc<ortho_config::OrthoError>> {
    AppConfig::merge_from_layers(composer.layers())
}

/// Helper: Asserts that a config has all default values.
pub fn assert_config_has_defaults(config: &AppConfig) {
    assert!(config.runtime.is_none(), "runtime should be None");
    assert_eq!(config.runtime_binary(), "docker");
    assert_eq!(
        config.container.name, "NOM-OS_A1",
        "container.name should be NOM-OS_A1"
    );
    assert_eq!(
        config.container.network, "bridge",
        "container.network should be bridge"
    );
    assert_eq!(
        config.container.volume_target.as_str(),
        "/data",
        "container.volume_target should be /data"
    );
    assert!(config.console.color, "console.color should be true");
    assert_eq!(config.logging.level, "warn", "logging.level should be warn");
}

/// Helper: Creates a `MergeComposer` with defaults, file, and env layers for
/// testing layer precedence.
pub fn create_composer_with_file_and_env() -> Result<MergeComposer, serde_json::Error> {
    use ortho_config::serde_json::json;

    let mut composer = create_composer_with_defaults()?;

    composer.push_file(
        json!({
            "runtime": "podman",
            "container": { "name": "depuis-fichier", "network": "host" }
        }),
        None,
    );

    composer.push_environment(json!({
        "runtime": "nerdctl"
    }));

    Ok(composer)
}
