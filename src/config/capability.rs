use std::fmt;

/// A single togglable installable feature, identified by a dotted
/// `category.name` path in the configuration file.
///
/// This enum is the required-capability list: one variant per action the
/// dispatcher knows how to perform. Every step names its variant, and the
/// step list is tested to cover [`Capability::ALL`] exactly once, so the
/// list and the executors cannot drift apart silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    UpdatePackages,
    UpgradePackages,
    InstallEssentials,
    Nvm,
    Pyenv,
    VsCode,
}

impl Capability {
    /// Every known capability, in the order the validator reports them.
    pub const ALL: [Self; 6] = [
        Self::UpdatePackages,
        Self::UpgradePackages,
        Self::InstallEssentials,
        Self::Nvm,
        Self::Pyenv,
        Self::VsCode,
    ];

    /// The dotted configuration path for this capability.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::UpdatePackages => "system.update_packages",
            Self::UpgradePackages => "system.upgrade_packages",
            Self::InstallEssentials => "system.install_essentials",
            Self::Nvm => "nodejs.nvm",
            Self::Pyenv => "python.pyenv",
            Self::VsCode => "editor.vscode",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
