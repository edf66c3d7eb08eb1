//! Binary-level CLI tests.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY_VARS: [&str; 3] = ["GROQ_API_KEY", "OPENAI_API_KEY", "SUPPORT_ROUTER_API_KEY"];

fn cmd(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("support-router").unwrap();
    cmd.current_dir(workdir.path()).env_remove("RUST_LOG");
    for var in KEY_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("init-prompts"));
}

#[test]
fn init_prompts_writes_templates_once() {
    let dir = TempDir::new().unwrap();
    let prompts = dir.path().join("prompts");

    cmd(&dir)
        .args(["init-prompts", "--dir"])
        .arg(&prompts)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 6 prompt template(s)"));

    for file in [
        "classifier.md",
        "order.md",
        "delivery.md",
        "payment.md",
        "account.md",
        "synthesizer.md",
    ] {
        assert!(prompts.join(file).is_file(), "{file} missing");
    }

    cmd(&dir)
        .args(["init-prompts", "--dir"])
        .arg(&prompts)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));
}

#[test]
fn ask_without_api_key_fails_before_any_call() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["ask", "Where is my package?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key not configured"));
}

#[test]
fn ask_with_unknown_provider_fails() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("GROQ_API_KEY", "test-key")
        .env("SUPPORT_ROUTER_PROVIDER", "carrier-pigeon")
        .args(["ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported provider"));
}

#[test]
fn invalid_log_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--log-format", "xml", "init-prompts", "--dir", "p"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log format"));
}

#[test]
fn each_api_key_variable_is_accepted() {
    for var in KEY_VARS {
        let dir = TempDir::new().unwrap();
        cmd(&dir)
            .env(var, "test-key")
            .env("SUPPORT_ROUTER_DEFAULT_LABEL", "human")
            .args(["ask", "hello"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid configuration"))
            .stderr(predicate::str::contains("API key not configured").not());
    }
}

#[test]
fn invalid_default_label_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("GROQ_API_KEY", "test-key")
        .env("SUPPORT_ROUTER_DEFAULT_LABEL", "human")
        .args(["ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn zero_timeout_from_environment_is_rejected() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("GROQ_API_KEY", "test-key")
        .env("SUPPORT_ROUTER_TIMEOUT_SECS", "0")
        .args(["ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout must be greater than zero"));
}

#[test]
fn non_numeric_timeout_from_environment_is_rejected() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("GROQ_API_KEY", "test-key")
        .env("SUPPORT_ROUTER_TIMEOUT_SECS", "soon")
        .args(["ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout-secs"));
}
