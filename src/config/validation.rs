//! Completeness check for the provisioning configuration.
//!
//! Every capability the dispatcher knows how to install must have an
//! explicit boolean entry before any step runs. Omissions are collected
//! over the whole required list and reported together, so the operator
//! fixes the file once instead of replaying a fix-one-rerun loop.

use super::{Capability, Config};
use crate::error::ConfigError;

/// Check that every known capability has an explicit entry.
///
/// # Errors
///
/// Returns [`ConfigError::Incomplete`] carrying every missing dotted
/// path, in [`Capability::ALL`] order.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let missing: Vec<String> = Capability::ALL
        .into_iter()
        .filter(|cap| config.lookup(*cap).is_none())
        .map(|cap| cap.path().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Incomplete { missing })
    }
}
