use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::config::Capability;
use crate::exec;

/// Packages every development host needs before anything else is set up.
const ESSENTIAL_PACKAGES: &[&str] = &[
    "build-essential",
    "ca-certificates",
    "curl",
    "git",
    "unzip",
    "wget",
    "zip",
];

/// Keeps apt from blocking an unattended run on configuration prompts.
const APT_ENV: &[(&str, &str)] = &[("DEBIAN_FRONTEND", "noninteractive")];

/// Refresh the apt package index.
pub struct UpdatePackageIndex;

impl Step for UpdatePackageIndex {
    fn name(&self) -> &'static str {
        "Update package index"
    }

    fn capability(&self) -> Capability {
        Capability::UpdatePackages
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        if !exec::which("apt-get") {
            return Ok(StepResult::Skipped("apt-get not found".to_string()));
        }
        if ctx.dry_run {
            ctx.log.dry_run("apt-get update");
            return Ok(StepResult::DryRun);
        }

        ctx.log.debug("refreshing package index");
        exec::run_with_env(ctx.identity.elevated(), "apt-get", &["update"], APT_ENV)?;
        ctx.log.success("package index refreshed");
        Ok(StepResult::Ok)
    }
}

/// Upgrade all installed packages.
pub struct UpgradePackages;

impl Step for UpgradePackages {
    fn name(&self) -> &'static str {
        "Upgrade packages"
    }

    fn capability(&self) -> Capability {
        Capability::UpgradePackages
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        if !exec::which("apt-get") {
            return Ok(StepResult::Skipped("apt-get not found".to_string()));
        }
        if ctx.dry_run {
            ctx.log.dry_run("apt-get -y dist-upgrade");
            return Ok(StepResult::DryRun);
        }

        ctx.log.debug("upgrading installed packages");
        exec::run_with_env(
            ctx.identity.elevated(),
            "apt-get",
            &["-y", "dist-upgrade"],
            APT_ENV,
        )?;
        ctx.log.success("packages upgraded");
        Ok(StepResult::Ok)
    }
}

/// Install the essential development packages.
pub struct InstallEssentials;

impl Step for InstallEssentials {
    fn name(&self) -> &'static str {
        "Install essential packages"
    }

    fn capability(&self) -> Capability {
        Capability::InstallEssentials
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        if !exec::which("apt-get") {
            return Ok(StepResult::Skipped("apt-get not found".to_string()));
        }
        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("apt-get -y install {}", ESSENTIAL_PACKAGES.join(" ")));
            return Ok(StepResult::DryRun);
        }

        ctx.log.debug(&format!(
            "installing {} essential packages",
            ESSENTIAL_PACKAGES.len()
        ));
        let mut args = vec!["-y", "install"];
        args.extend_from_slice(ESSENTIAL_PACKAGES);
        exec::run_with_env(ctx.identity.elevated(), "apt-get", &args, APT_ENV)?;
        ctx.log.success("essential packages installed");
        Ok(StepResult::Ok)
    }
}
