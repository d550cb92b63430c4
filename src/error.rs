//! Typed errors for configuration loading and gating.
//!
//! Configuration code returns [`ConfigError`] values; command handlers at
//! the CLI boundary convert them to [`anyhow::Error`] via the standard `?`
//! operator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, parsing, or interrogating the
/// provisioning configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file exists at the resolved path.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML.
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying TOML deserialization error.
        source: toml::de::Error,
    },

    /// One or more required capability switches are absent from the
    /// document. Collected over the whole required list so the operator
    /// can fix the file in a single pass.
    #[error("configuration is incomplete; missing required settings: {}", missing.join(", "))]
    Incomplete {
        /// Every missing dotted path, in declaration order.
        missing: Vec<String>,
    },

    /// A capability queried at gate time has no entry at all (as opposed
    /// to an explicit `false`).
    #[error("required setting '{path}' is absent from the configuration")]
    Missing {
        /// Dotted path of the absent setting.
        path: String,
    },
}
