use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::config::Capability;
use crate::logging::Logger;

/// Run the check command: load and validate the configuration without
/// executing any provisioning step.
///
/// # Errors
///
/// Returns an error if the configuration is absent, unparseable, or
/// incomplete.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    for capability in Capability::ALL {
        let state = if setup.config.gate(capability)? {
            "enabled"
        } else {
            "disabled"
        };
        log.info(&format!("{capability} = {state}"));
    }

    log.success(&format!("{} ok", setup.path.display()));
    Ok(())
}
