//! CLI smoke tests for the brandseek binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    Command::cargo_bin("brandseek")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"))
        .stdout(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_missing_providers_is_a_config_error() {
    Command::cargo_bin("brandseek")
        .unwrap()
        .arg("some product brief")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No LLM providers configured"));
}
