use anyhow::{Context as _, Result};

use super::helpers::append_once;
use super::{Context, Step, StepResult};
use crate::config::Capability;
use crate::exec;

/// Pinned nvm release fetched by the remote installer.
const NVM_VERSION: &str = "v0.40.3";

/// Substring proving the activation block is already in the profile.
const NVM_MARKER: &str = "NVM_DIR";

/// Lines that make nvm available in interactive shells.
const NVM_ACTIVATION: &str = concat!(
    "export NVM_DIR=\"$HOME/.nvm\"\n",
    "[ -s \"$NVM_DIR/nvm.sh\" ] && \\. \"$NVM_DIR/nvm.sh\"",
);

/// Install the Node version manager for the original user.
pub struct InstallNvm;

impl Step for InstallNvm {
    fn name(&self) -> &'static str {
        "Install nvm"
    }

    fn capability(&self) -> Capability {
        Capability::Nvm
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let nvm_dir = ctx.identity.user.home.join(".nvm");
        let profile = ctx.identity.user.home.join(".bashrc");

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "install nvm {NVM_VERSION} and append activation lines to {}",
                profile.display()
            ));
            return Ok(StepResult::DryRun);
        }

        if nvm_dir.exists() {
            ctx.log
                .debug(&format!("{} already present", nvm_dir.display()));
        } else {
            ctx.log.debug(&format!("fetching nvm {NVM_VERSION} installer"));
            let script = format!(
                "curl -fsSL https://raw.githubusercontent.com/nvm-sh/nvm/{NVM_VERSION}/install.sh | bash"
            );
            exec::run_shell(ctx.identity.original(), &script)
                .context("running the nvm installer")?;
        }

        if append_once(&profile, NVM_MARKER, NVM_ACTIVATION)? {
            ctx.log
                .info(&format!("added nvm activation to {}", profile.display()));
        } else {
            ctx.log.debug("nvm activation already in profile");
        }

        ctx.log.success("nvm ready");
        Ok(StepResult::Ok)
    }
}
