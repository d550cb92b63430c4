#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the `check` command.
//!
//! These exercise the loader and validator end to end against the real
//! binary: missing files, incomplete documents, and healthy documents of
//! both polarities.

mod common;

use common::{ALL_DISABLED, ALL_ENABLED, MISSING_NVM, devsetup, write_config};
use predicates::prelude::*;

#[test]
fn missing_config_file_fails_with_not_found() {
    let home = tempfile::tempdir().unwrap();
    devsetup(home.path())
        .args(["check", "--config"])
        .arg(home.path().join("does-not-exist.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn invalid_toml_fails_with_parse_error() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), "[system\nupdate_packages = true");
    devsetup(home.path())
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn omitted_capability_is_reported_by_exact_path() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), MISSING_NVM);
    devsetup(home.path())
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("nodejs.nvm")
                .and(predicate::str::contains("python.pyenv").not()),
        );
}

#[test]
fn every_omission_is_reported_in_one_run() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), "[system]\nupdate_packages = true\n");
    devsetup(home.path())
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("system.upgrade_packages")
                .and(predicate::str::contains("system.install_essentials"))
                .and(predicate::str::contains("nodejs.nvm"))
                .and(predicate::str::contains("python.pyenv"))
                .and(predicate::str::contains("editor.vscode")),
        );
}

#[test]
fn complete_config_passes() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), ALL_ENABLED);
    devsetup(home.path())
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("nodejs.nvm = enabled"));
}

#[test]
fn all_disabled_config_is_still_complete() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), ALL_DISABLED);
    devsetup(home.path())
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("editor.vscode = disabled"));
}
