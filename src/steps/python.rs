use anyhow::{Context as _, Result};

use super::helpers::append_once;
use super::{Context, Step, StepResult};
use crate::config::Capability;
use crate::exec;

/// Substring proving the activation block is already in the profile.
const PYENV_MARKER: &str = "PYENV_ROOT";

/// Lines that make pyenv available in interactive shells.
const PYENV_ACTIVATION: &str = concat!(
    "export PYENV_ROOT=\"$HOME/.pyenv\"\n",
    "[ -d \"$PYENV_ROOT/bin\" ] && export PATH=\"$PYENV_ROOT/bin:$PATH\"\n",
    "eval \"$(pyenv init - bash)\"",
);

/// Install the Python version manager for the original user.
pub struct InstallPyenv;

impl Step for InstallPyenv {
    fn name(&self) -> &'static str {
        "Install pyenv"
    }

    fn capability(&self) -> Capability {
        Capability::Pyenv
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let pyenv_dir = ctx.identity.user.home.join(".pyenv");
        let profile = ctx.identity.user.home.join(".bashrc");

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "install pyenv and append activation lines to {}",
                profile.display()
            ));
            return Ok(StepResult::DryRun);
        }

        if pyenv_dir.exists() {
            ctx.log
                .debug(&format!("{} already present", pyenv_dir.display()));
        } else {
            ctx.log.debug("fetching pyenv installer");
            exec::run_shell(
                ctx.identity.original(),
                "curl -fsSL https://pyenv.run | bash",
            )
            .context("running the pyenv installer")?;
        }

        if append_once(&profile, PYENV_MARKER, PYENV_ACTIVATION)? {
            ctx.log
                .info(&format!("added pyenv activation to {}", profile.display()));
        } else {
            ctx.log.debug("pyenv activation already in profile");
        }

        ctx.log.success("pyenv ready");
        Ok(StepResult::Ok)
    }
}
