// Shared helpers for integration tests.
//
// Provides config-file fixtures and a command builder that isolates the
// binary from the host environment (own HOME, own cache dir, no inherited
// sudo context).
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// A complete configuration with every capability enabled.
pub const ALL_ENABLED: &str = r#"
[system]
update_packages = true
upgrade_packages = true
install_essentials = true

[nodejs]
nvm = true

[python]
pyenv = true

[editor]
vscode = true
"#;

/// A complete configuration with every capability disabled.
pub const ALL_DISABLED: &str = r#"
[system]
update_packages = false
upgrade_packages = false
install_essentials = false

[nodejs]
nvm = false

[python]
pyenv = false

[editor]
vscode = false
"#;

/// Complete except for the package-index refresh, which is disabled.
pub const UPDATE_DISABLED: &str = r#"
[system]
update_packages = false
upgrade_packages = true
install_essentials = true

[nodejs]
nvm = true

[python]
pyenv = true

[editor]
vscode = true
"#;

/// A configuration omitting the `nodejs.nvm` entry entirely.
pub const MISSING_NVM: &str = r#"
[system]
update_packages = true
upgrade_packages = true
install_essentials = true

[python]
pyenv = true

[editor]
vscode = true
"#;

/// Write `contents` as `config.toml` inside `dir`, returning its path.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).expect("write config file");
    path
}

/// Command builder for the devsetup binary with an isolated environment.
///
/// `home` doubles as the fake user home and the parent of the cache dir,
/// so a test run can never touch the real profile or log files.
pub fn devsetup(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("devsetup").expect("binary should build");
    cmd.env("HOME", home)
        .env("XDG_CACHE_HOME", home.join(".cache"))
        .env("USER", "tester")
        .env_remove("SUDO_USER")
        .env_remove("DEVSETUP_CONFIG");
    cmd
}
