use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Output};

/// How an external command is invoked relative to the current process
/// identity. Resolved once at startup (see [`crate::identity`]) and passed
/// explicitly to every call in this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunAs {
    /// Run as the current process identity, unmodified.
    Direct,
    /// Escalate through sudo.
    Sudo,
    /// Drop to the named account through sudo.
    SudoAs(String),
}

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Build the actual argv for invoking `program` under `run_as`.
///
/// The sudo arms pass `-n` so a missing credential fails immediately
/// instead of blocking the run on a password prompt.
fn invocation(run_as: &RunAs, program: &str, args: &[&str]) -> (String, Vec<String>) {
    match run_as {
        RunAs::Direct => (
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
        ),
        RunAs::Sudo => {
            let mut argv = vec!["-n".to_string(), program.to_string()];
            argv.extend(args.iter().map(ToString::to_string));
            ("sudo".to_string(), argv)
        }
        RunAs::SudoAs(user) => {
            let mut argv = vec![
                "-n".to_string(),
                "-u".to_string(),
                user.clone(),
                "-H".to_string(),
                "--".to_string(),
                program.to_string(),
            ];
            argv.extend(args.iter().map(ToString::to_string));
            ("sudo".to_string(), argv)
        }
    }
}

fn command(run_as: &RunAs, program: &str, args: &[&str]) -> Command {
    let (bin, argv) = invocation(run_as, program, args);
    let mut cmd = Command::new(bin);
    cmd.args(argv);
    cmd
}

/// Execute a command and return the result, bailing on non-zero exit.
fn execute_checked(mut cmd: Command, label: &str) -> Result<ExecResult> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute: {label}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "{label} failed (exit {}): {}",
            result.code.unwrap_or(-1),
            result.stderr.trim()
        );
    }
    Ok(result)
}

/// Run a command under the given identity. Fails if it exits non-zero.
pub fn run(run_as: &RunAs, program: &str, args: &[&str]) -> Result<ExecResult> {
    execute_checked(command(run_as, program, args), program)
}

/// Run a command with extra environment variables set on the child.
pub fn run_with_env(
    run_as: &RunAs,
    program: &str,
    args: &[&str],
    env: &[(&str, &str)],
) -> Result<ExecResult> {
    let mut cmd = command(run_as, program, args);
    for (k, v) in env {
        cmd.env(k, v);
    }
    execute_checked(cmd, program)
}

/// Run a command, allowing failure (returns result without bailing).
pub fn run_unchecked(run_as: &RunAs, program: &str, args: &[&str]) -> Result<ExecResult> {
    let output = command(run_as, program, args)
        .output()
        .with_context(|| format!("failed to execute: {program}"))?;
    Ok(ExecResult::from(output))
}

/// Run a command in a specific directory, allowing failure.
pub fn run_in_unchecked(
    run_as: &RunAs,
    dir: &Path,
    program: &str,
    args: &[&str],
) -> Result<ExecResult> {
    let output = command(run_as, program, args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed to execute: {program} in {}", dir.display()))?;
    Ok(ExecResult::from(output))
}

/// Run a shell snippet under the given identity. Fails on non-zero exit.
///
/// Used for the fetch-and-execute installer pattern (`curl … | bash`)
/// where a pipeline is the whole point.
pub fn run_shell(run_as: &RunAs, script: &str) -> Result<ExecResult> {
    execute_checked(command(run_as, "bash", &["-c", script]), script)
}

/// Check if a program is available on PATH.
#[must_use]
pub fn which(program: &str) -> bool {
    which::which(program).is_ok()
}
