pub mod apply;
pub mod check;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{self, Config, validation};
use crate::error::ConfigError;
use crate::logging::Logger;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates config-path resolution, loading, and validation so that
/// each command does not repeat the boilerplate.
pub struct CommandSetup {
    pub config: Config,
    pub path: PathBuf,
}

impl CommandSetup {
    /// Resolve the config path, load the document, and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is absent, unreadable, unparseable,
    /// or missing required capability entries (every omission is logged
    /// individually before the error propagates).
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let path = config::resolve_path(global.config.as_deref());

        log.stage("Loading configuration");
        log.debug(&format!("config path: {}", path.display()));
        let config = Config::load(&path)?;

        log.stage("Validating configuration");
        if let Err(e) = validation::validate(&config) {
            if let ConfigError::Incomplete { missing } = &e {
                for path in missing {
                    log.error(&format!("missing required setting: {path}"));
                }
            }
            return Err(e.into());
        }
        log.info("all required settings present");

        Ok(Self { config, path })
    }
}
