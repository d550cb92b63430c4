use std::path::{Path, PathBuf};

use anyhow::Result;

use super::helpers::append_once;
use super::{Context, Step, StepResult};
use crate::config::Capability;
use crate::exec::{self, RunAs};

/// Substring proving the launcher function is already in the profile.
const CODE_MARKER: &str = "code()";

/// Windows mount every WSL distribution has; `cmd.exe` refuses to start
/// from a Linux-filesystem working directory.
const WINDOWS_MOUNT: &str = "/mnt/c";

/// Wire the Windows VS Code CLI into the WSL shell.
///
/// The branchiest step: each probe that fails downgrades to a warning and
/// skips the remainder, rather than aborting the whole run.
pub struct ConfigureVsCode;

impl Step for ConfigureVsCode {
    fn name(&self) -> &'static str {
        "Configure VS Code"
    }

    fn capability(&self) -> Capability {
        Capability::VsCode
    }

    fn applicable(&self, ctx: &Context) -> bool {
        ctx.platform.is_wsl()
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let Some(windows_user) = windows_username() else {
            ctx.log
                .warn("could not resolve the Windows username; skipping VS Code integration");
            return Ok(StepResult::Skipped("Windows username unresolved".to_string()));
        };
        ctx.log.debug(&format!("windows user: {windows_user}"));

        let cli = code_cli_path(&windows_user);
        if !cli.exists() {
            ctx.log
                .warn(&format!("VS Code CLI not found at {}", cli.display()));
            return Ok(StepResult::Skipped(
                "VS Code not installed on the Windows host".to_string(),
            ));
        }

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "append code() launcher for {} and verify it",
                cli.display()
            ));
            return Ok(StepResult::DryRun);
        }

        let profile = ctx.identity.user.home.join(".bashrc");
        let launcher = format!("code() {{ \"{}\" \"$@\"; }}", cli.display());
        if append_once(&profile, CODE_MARKER, &launcher)? {
            ctx.log
                .info(&format!("added code() launcher to {}", profile.display()));
        } else {
            ctx.log.debug("code() launcher already in profile");
        }

        verify(ctx, &cli);
        Ok(StepResult::Ok)
    }
}

/// Ask the Windows host for the active username.
fn windows_username() -> Option<String> {
    let result = exec::run_in_unchecked(
        &RunAs::Direct,
        Path::new(WINDOWS_MOUNT),
        "cmd.exe",
        &["/C", "echo %USERNAME%"],
    )
    .ok()?;
    if !result.success {
        return None;
    }
    let name = result.stdout.trim().to_string();
    // An unexpanded %USERNAME% means cmd.exe ran but the variable is unset.
    (!name.is_empty() && !name.contains('%')).then_some(name)
}

/// Default install location of the user-scoped VS Code CLI shim.
fn code_cli_path(windows_user: &str) -> PathBuf {
    PathBuf::from("/mnt/c/Users")
        .join(windows_user)
        .join("AppData/Local/Programs/Microsoft VS Code/bin/code")
}

/// Invoke the editor once to confirm it is reachable.
///
/// Advisory only: the launcher stays in place when the probe fails.
fn verify(ctx: &Context, cli: &Path) {
    let cli = cli.to_string_lossy();
    match exec::run_unchecked(ctx.identity.original(), &cli, &["--version"]) {
        Ok(result) if result.success => {
            let version = result.stdout.lines().next().unwrap_or("unknown");
            ctx.log
                .success(&format!("VS Code {version} reachable from the shell"));
        }
        _ => ctx
            .log
            .warn("VS Code launcher installed but invoking `code --version` failed"),
    }
}
