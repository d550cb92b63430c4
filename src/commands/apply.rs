use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::identity::Identity;
use crate::logging::Logger;
use crate::platform::Platform;
use crate::steps::{self, Context};

/// Run the apply command: the full provisioning sequence.
///
/// # Errors
///
/// Returns an error if configuration loading or validation fails, the
/// execution identity cannot be resolved, or any enabled step fails. The
/// ownership sweep and the summary still run before a step failure
/// propagates.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let version = option_env!("DEVSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("devsetup {version}"));

    let setup = CommandSetup::init(global, log)?;

    log.stage("Resolving execution identity");
    let identity = Identity::resolve()?;
    log.info(&format!(
        "provisioning for {} ({})",
        identity.user.name,
        identity.user.home.display()
    ));
    if !identity.is_elevated() {
        log.warn("not running as root; system-wide steps will go through sudo");
    }

    let platform = Platform::detect();
    log.debug(&format!("host: {platform}"));

    let ctx = Context {
        config: &setup.config,
        platform: &platform,
        identity: &identity,
        log,
        dry_run: global.dry_run,
    };

    let outcome = run_steps(&ctx);

    // Ownership repair is unconditional: even an aborted run can have
    // left root-owned files in the user's home.
    steps::finalize::fix_ownership(&ctx);

    log.print_summary();
    outcome
}

/// Dispatch every step in its fixed order, halting at the first failure.
fn run_steps(ctx: &Context) -> Result<()> {
    for step in steps::all_steps() {
        steps::execute(step.as_ref(), ctx)?;
    }
    Ok(())
}
