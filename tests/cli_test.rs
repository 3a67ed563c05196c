//! Binary startup tests
//! Run with: cargo test --test cli_test

use std::path::Path;
use std::process::{Command, Output};

fn eikumi(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eikumi"))
        .args(args)
        .current_dir(dir)
        .env_remove("DISCORD_TOKEN")
        .env("NO_COLOR", "1")
        .output()
        .expect("Should spawn eikumi")
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Missing config stops the process before any connection attempt
#[test]
fn test_missing_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    let output = eikumi(dir.path(), &["run", "--token", "not-a-real-token"]);

    assert_eq!(output.status.code(), Some(1));
    let log = combined(&output);
    assert!(log.contains("config.json` does not exist"), "unexpected output: {}", log);
    assert!(!log.contains("connected"), "should not connect: {}", log);
}

#[test]
fn test_malformed_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ \"guilds\": ").unwrap();

    let output = eikumi(dir.path(), &["run", "--token", "not-a-real-token"]);

    assert_eq!(output.status.code(), Some(1));
    let log = combined(&output);
    assert!(log.contains("Could not parse"), "unexpected output: {}", log);
    assert_eq!(log.matches("Caused by:").count(), 1, "unexpected output: {}", log);
}

/// Without a subcommand the bot starts as if `run` was given
#[test]
fn test_bare_invocation_runs_bot() {
    let dir = tempfile::tempdir().unwrap();

    let output = eikumi(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let log = combined(&output);
    assert!(log.contains("config.json` does not exist"), "unexpected output: {}", log);
}

#[test]
fn test_missing_token_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{ "guilds": {} }"#).unwrap();

    let output = eikumi(dir.path(), &["run"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("DISCORD_TOKEN environment variable is not set"));
}

#[test]
fn test_init_config_writes_loadable_sample() {
    let dir = tempfile::tempdir().unwrap();

    let output = eikumi(dir.path(), &["init-config"]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(value["guilds"].is_object());

    // Refuses to overwrite
    let output = eikumi(dir.path(), &["init-config"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();

    let output = eikumi(dir.path(), &["version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("eikumi v"));
}
