pub mod capability;
pub mod validation;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use capability::Capability;

use crate::error::ConfigError;

/// File name the loader looks for when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// The declarative provisioning configuration: nested categories of
/// boolean switches, one per installable capability.
///
/// Every leaf is an `Option<bool>` so that "present but false" and
/// "absent" stay distinct states — an absent leaf is a configuration
/// error, never a default.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system: System,
    #[serde(default)]
    pub nodejs: Nodejs,
    #[serde(default)]
    pub python: Python,
    #[serde(default)]
    pub editor: Editor,
}

/// `[system]` — package-manager level switches.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct System {
    pub update_packages: Option<bool>,
    pub upgrade_packages: Option<bool>,
    pub install_essentials: Option<bool>,
}

/// `[nodejs]` — Node toolchain switches.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Nodejs {
    pub nvm: Option<bool>,
}

/// `[python]` — Python toolchain switches.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Python {
    pub pyenv: Option<bool>,
}

/// `[editor]` — editor integration switches.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Editor {
    pub vscode: Option<bool>,
}

impl Config {
    /// Load the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no file exists at the path,
    /// [`ConfigError::Io`] if it cannot be read, or [`ConfigError::Parse`]
    /// if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the configured value of a capability.
    ///
    /// `None` means the key is wholly absent from the document.
    #[must_use]
    pub const fn lookup(&self, capability: Capability) -> Option<bool> {
        match capability {
            Capability::UpdatePackages => self.system.update_packages,
            Capability::UpgradePackages => self.system.upgrade_packages,
            Capability::InstallEssentials => self.system.install_essentials,
            Capability::Nvm => self.nodejs.nvm,
            Capability::Pyenv => self.python.pyenv,
            Capability::VsCode => self.editor.vscode,
        }
    }

    /// Gate a capability: `Ok(true)` to run, `Ok(false)` to skip.
    ///
    /// An absent key is [`ConfigError::Missing`]. Unreachable after a
    /// successful validation pass, but re-checked here so steps stay safe
    /// to drive standalone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the capability's path.
    pub fn gate(&self, capability: Capability) -> Result<bool, ConfigError> {
        self.lookup(capability).ok_or_else(|| ConfigError::Missing {
            path: capability.path().to_string(),
        })
    }
}

/// Resolve the configuration file path.
///
/// Precedence: the `--config` flag, the `DEVSETUP_CONFIG` environment
/// variable, a `config.toml` beside the executable, then one in the
/// current directory. When nothing exists the executable-adjacent default
/// is returned so the loader can report a concrete missing path.
#[must_use]
pub fn resolve_path(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Ok(env) = std::env::var("DEVSETUP_CONFIG") {
        return PathBuf::from(env);
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)));
    if let Some(ref path) = beside_exe
        && path.exists()
    {
        return path.clone();
    }

    let cwd = Path::new(CONFIG_FILE_NAME);
    if cwd.exists() {
        return cwd.to_path_buf();
    }

    beside_exe.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}
