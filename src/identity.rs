//! Execution identity resolution.
//!
//! Two principals participate in a provisioning run: the elevated context
//! used for system-wide package operations, and the original unprivileged
//! user whose shell profile and home-directory tools are being set up.
//! Both are resolved once at startup and read-only thereafter; every
//! external call names its principal explicitly via [`RunAs`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::exec::{self, RunAs};

/// The original unprivileged account the environment is provisioned for.
#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    pub home: PathBuf,
}

/// The two execution principals, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Identity {
    /// The account whose environment is being provisioned.
    pub user: User,
    elevated: RunAs,
    original: RunAs,
    is_root: bool,
}

impl Identity {
    /// Resolve both principals from the process environment.
    ///
    /// Under `sudo` the invoking account is recovered from `SUDO_USER`;
    /// otherwise the current login (`USER`/`LOGNAME`) is both principals'
    /// base and elevation goes back through sudo.
    ///
    /// # Errors
    ///
    /// Returns an error if no login name can be determined.
    pub fn resolve() -> Result<Self> {
        let is_root = process_is_root();
        let sudo_user = std::env::var("SUDO_USER")
            .ok()
            .filter(|u| !u.is_empty() && u != "root");
        let login_user = std::env::var("USER")
            .ok()
            .or_else(|| std::env::var("LOGNAME").ok());

        let (name, original) = pick_user(is_root, sudo_user, login_user)?;
        let home = resolve_home(&name, original == RunAs::Direct);
        let elevated = if is_root { RunAs::Direct } else { RunAs::Sudo };

        Ok(Self {
            user: User { name, home },
            elevated,
            original,
            is_root,
        })
    }

    /// Identity for system-wide operations.
    #[must_use]
    pub const fn elevated(&self) -> &RunAs {
        &self.elevated
    }

    /// Identity for user-local operations.
    #[must_use]
    pub const fn original(&self) -> &RunAs {
        &self.original
    }

    /// Whether the process itself holds root privileges.
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        self.is_root
    }

    /// Create an identity with explicit values (for testing).
    #[cfg(test)]
    pub(crate) fn for_tests(name: &str, home: &Path) -> Self {
        Self {
            user: User {
                name: name.to_string(),
                home: home.to_path_buf(),
            },
            elevated: RunAs::Direct,
            original: RunAs::Direct,
            is_root: false,
        }
    }
}

/// Decide the original user's name and how to run as them.
fn pick_user(
    is_root: bool,
    sudo_user: Option<String>,
    login_user: Option<String>,
) -> Result<(String, RunAs)> {
    if is_root && let Some(name) = sudo_user {
        let run_as = RunAs::SudoAs(name.clone());
        return Ok((name, run_as));
    }
    let name = login_user.context("cannot determine the current user: USER and LOGNAME are unset")?;
    Ok((name, RunAs::Direct))
}

/// Resolve the user's home directory.
///
/// For the current login the `HOME` variable is authoritative. For a
/// sudo-recovered user it points at root's home, so the account database
/// is consulted instead, with the Debian convention as a last resort.
fn resolve_home(name: &str, is_current_login: bool) -> PathBuf {
    if is_current_login && let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home);
    }
    if let Ok(result) = exec::run_unchecked(&RunAs::Direct, "getent", &["passwd", name])
        && result.success
        && let Some(home) = result.stdout.trim().split(':').nth(5)
        && !home.is_empty()
    {
        return PathBuf::from(home);
    }
    Path::new("/home").join(name)
}

/// Probe the effective uid via `id -u`.
fn process_is_root() -> bool {
    exec::run_unchecked(&RunAs::Direct, "id", &["-u"])
        .map(|r| r.stdout.trim() == "0")
        .unwrap_or(false)
}
