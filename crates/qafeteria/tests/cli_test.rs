//! Integration tests for the `qafeteria` CLI binary.
//!
//! Every flow runs with `--instant` and an isolated config location, so
//! tests neither wait on simulated latency nor touch the user's files.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `qafeteria` binary with env isolation.
///
/// Clears all `QAFETERIA_*` env vars and points config directories at a
/// nonexistent path.
fn qafeteria_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("qafeteria");
    cmd.env("HOME", "/tmp/qafeteria-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/qafeteria-cli-test-nonexistent")
        .env_remove("QAFETERIA_CONFIG")
        .env_remove("QAFETERIA_OUTPUT")
        .env_remove("QAFETERIA_AUTH__EMAIL")
        .env_remove("QAFETERIA_AUTH__PASSWORD")
        .env_remove("QAFETERIA_AUTH__MAX_LOGIN_ATTEMPTS")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = qafeteria_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    qafeteria_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("login")
            .and(predicate::str::contains("logout"))
            .and(predicate::str::contains("ids"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    qafeteria_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qafeteria"));
}

#[test]
fn test_completions_zsh() {
    qafeteria_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Login ───────────────────────────────────────────────────────────

#[test]
fn test_login_success() {
    let output = qafeteria_cmd()
        .args(["-o", "json", "login", "--instant", "-e", "vitor@app.com", "-p", "vitor123"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let report = json_stdout(&output);
    assert_eq!(report["phase"], "authenticated");
    assert_eq!(report["attempts"][0]["outcome"], "authenticated");
    assert_eq!(report["attempts"][0]["level"], "success");
    assert_eq!(report["attempts"][0]["notification"], "Login realizado com sucesso!");
    assert_eq!(report["state"]["attempts"]["count"], 0);
    assert_eq!(report["navigation"][0]["route"], "Home");
}

#[test]
fn test_login_lockout_after_three_failures() {
    let output = qafeteria_cmd()
        .args(["-o", "json", "login", "--instant", "-e", "x@x.com", "-p", "bad", "--repeat", "3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));

    let report = json_stdout(&output);
    assert_eq!(report["state"]["attempts"]["locked"], true);
    assert_eq!(report["state"]["attempts"]["count"], 3);
    assert_eq!(report["phase"], "unauthenticated");
    assert_eq!(report["attempts"][2]["level"], "error");
    assert_eq!(
        report["attempts"][1]["notification"],
        "Credenciais incorretas. Tentativa 2 de 3"
    );
}

#[test]
fn test_login_after_lockout_rejects_correct_pair() {
    let output = qafeteria_cmd()
        .env("QAFETERIA_AUTH__MAX_LOGIN_ATTEMPTS", "1")
        .args(["-o", "json", "login", "--instant", "-e", "x@x.com", "-p", "bad", "--repeat", "2"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));

    let report = json_stdout(&output);
    assert_eq!(
        report["attempts"][1]["notification"],
        "Muitas tentativas de login. Tente novamente mais tarde."
    );
}

#[test]
fn test_login_empty_email_is_warning() {
    let output = qafeteria_cmd()
        .args(["-o", "json", "login", "--instant", "-e", "", "-p", "vitor123"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let report = json_stdout(&output);
    assert_eq!(report["attempts"][0]["outcome"], "empty_field");
    assert_eq!(report["attempts"][0]["level"], "warning");
    assert_eq!(report["state"]["attempts"]["count"], 1);
}

#[test]
fn test_login_rejection_diagnostic() {
    qafeteria_cmd()
        .args(["login", "--instant", "-e", "vitor@app.com", "-p", "wrong"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid_credentials"));
}

#[test]
fn test_login_missing_password_non_interactive() {
    qafeteria_cmd()
        .args(["login", "--instant", "-e", "vitor@app.com"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("password"));
}

#[test]
fn test_login_plain_output() {
    qafeteria_cmd()
        .args(["-o", "plain", "login", "--instant", "-e", "vitor@app.com", "-p", "vitor123"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("authenticated\tLogin realizado com sucesso!"));
}

// ── Logout ──────────────────────────────────────────────────────────

#[test]
fn test_logout_requires_yes_when_non_interactive() {
    qafeteria_cmd()
        .args(["logout", "--instant"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_logout_full_sequence() {
    let output = qafeteria_cmd()
        .args(["-o", "json", "--yes", "logout", "--instant"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let report = json_stdout(&output);
    assert_eq!(report["steps"][0]["outcome"], "authenticated");
    assert_eq!(report["steps"][1]["outcome"], "logged_out");
    assert_eq!(report["steps"][1]["notification"], "Logout realizado com sucesso!");
    assert_eq!(report["phase"], "unauthenticated");
    assert_eq!(report["navigation"][1]["route"], "Login");
    assert!(
        report["back_navigation"]
            .as_str()
            .unwrap()
            .starts_with("refused")
    );
}

// ── Identifiers ─────────────────────────────────────────────────────

#[test]
fn test_ids_plain_lists_catalogue() {
    qafeteria_cmd()
        .args(["-o", "plain", "ids"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("login-form-submit-button")
                .and(predicate::str::contains("home-toast-text")),
        );
}

#[test]
fn test_ids_screen_filter() {
    qafeteria_cmd()
        .args(["-o", "plain", "ids", "--screen", "home"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("logout-button")
                .and(predicate::str::contains("login-toast").not()),
        );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    qafeteria_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_login_attempts = 3"));
}

#[test]
fn test_config_init_then_use() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path_str = path.to_str().unwrap();

    qafeteria_cmd()
        .args(["--config", path_str, "config", "init", "--defaults"])
        .assert()
        .success();
    assert!(path.exists());

    // A second init refuses to clobber the file.
    qafeteria_cmd()
        .args(["--config", path_str, "config", "init", "--defaults"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("--force"));

    std::fs::write(&path, "[auth]\nmax_login_attempts = 1\n").unwrap();
    let output = qafeteria_cmd()
        .args(["--config", path_str, "-o", "json", "login", "--instant", "-e", "a@b.co", "-p", "nope12"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(json_stdout(&output)["state"]["max_attempts"], 1);
}

#[test]
fn test_env_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[auth]\nmax_login_attempts = 5\n").unwrap();

    let output = qafeteria_cmd()
        .env("QAFETERIA_AUTH__MAX_LOGIN_ATTEMPTS", "1")
        .args(["--config", path.to_str().unwrap(), "-o", "json", "login", "--instant", "-e", "a@b.co", "-p", "nope12"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));

    let report = json_stdout(&output);
    assert_eq!(report["state"]["max_attempts"], 1);
    assert_eq!(report["state"]["attempts"]["locked"], true);
    assert_eq!(report["state"]["attempts"]["count"], 1);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[user]\nrole = \"root\"\n").unwrap();

    qafeteria_cmd()
        .args(["--config", path.to_str().unwrap(), "ids"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("user.role"));
}

#[test]
fn test_invalid_output_format() {
    let output = qafeteria_cmd()
        .args(["--output", "invalid", "ids"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("invalid") || text.contains("possible values"));
}
