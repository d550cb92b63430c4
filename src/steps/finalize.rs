//! Post-run ownership repair.
//!
//! Steps that run elevated can leave user-local files owned by root (a
//! profile created by an append, an installer's directory). The sweep
//! hands a fixed list of well-known paths back to the original user.

use super::Context;
use crate::exec;

/// User-local paths the provisioning steps may touch while elevated.
const USER_PATHS: &[&str] = &[".bashrc", ".nvm", ".pyenv"];

/// Hand ownership of well-known user-local paths back to the original user.
///
/// Runs after every step regardless of gating or failures. Each
/// correction is independently best-effort: a path that cannot be fixed
/// is reported and the sweep moves on. Never fails the run.
pub fn fix_ownership(ctx: &Context) {
    if !ctx.identity.is_elevated() {
        ctx.log
            .debug("not running elevated; ownership sweep not needed");
        return;
    }

    ctx.log.stage("Fixing ownership");
    // "name:" resets the group to the account's login group as well.
    let owner = format!("{}:", ctx.identity.user.name);

    for rel in USER_PATHS {
        let path = ctx.identity.user.home.join(rel);
        if !path.exists() {
            ctx.log.debug(&format!("skip: {} (absent)", path.display()));
            continue;
        }
        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("chown -R {owner} {}", path.display()));
            continue;
        }

        let path_str = path.to_string_lossy();
        match exec::run_unchecked(ctx.identity.elevated(), "chown", &["-R", &owner, &path_str]) {
            Ok(result) if result.success => {
                ctx.log
                    .debug(&format!("ownership fixed: {}", path.display()));
            }
            Ok(result) => ctx.log.warn(&format!(
                "could not fix ownership of {}: {}",
                path.display(),
                result.stderr.trim()
            )),
            Err(e) => ctx.log.warn(&format!(
                "could not fix ownership of {}: {e:#}",
                path.display()
            )),
        }
    }
}
