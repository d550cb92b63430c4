//! Named, order-fixed provisioning steps dispatched behind capability gates.

pub mod editor;
pub mod finalize;
pub mod helpers;
pub mod nodejs;
pub mod python;
pub mod system;

use anyhow::Result;

use crate::config::{Capability, Config};
use crate::identity::Identity;
use crate::logging::{Logger, StepStatus};
use crate::platform::Platform;

/// Shared context for step execution.
///
/// The run is strictly sequential, so everything is borrowed for the
/// duration of the dispatch loop; no shared-state machinery is needed.
pub struct Context<'a> {
    /// Validated configuration document.
    pub config: &'a Config,
    /// Detected host characteristics.
    pub platform: &'a Platform,
    /// Execution principals resolved at startup.
    pub identity: &'a Identity,
    /// Logger for output and step recording.
    pub log: &'a Logger,
    /// Preview actions without performing them.
    pub dry_run: bool,
}

/// Outcome of a single executed step.
#[derive(Debug, Clone)]
pub enum StepResult {
    /// The step ran and the system is in the desired state.
    Ok,
    /// The step decided nothing needed doing, with a reason.
    Skipped(String),
    /// Dry-run mode: actions were logged, not performed.
    DryRun,
}

/// A named, capability-gated provisioning step.
pub trait Step {
    /// Human-readable step name.
    fn name(&self) -> &'static str;

    /// The configuration switch that gates this step.
    fn capability(&self) -> Capability;

    /// Whether the step applies to the detected host at all.
    fn applicable(&self, _ctx: &Context) -> bool {
        true
    }

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error when an external action fails; the dispatcher
    /// halts the run on the first such error.
    fn run(&self, ctx: &Context) -> Result<StepResult>;
}

/// The complete provisioning sequence, in execution order.
///
/// Ordering is human-sensible (refresh before upgrade, version managers
/// before anything that would use them); no step consumes another's
/// output.
#[must_use]
pub fn all_steps() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(system::UpdatePackageIndex),
        Box::new(system::UpgradePackages),
        Box::new(system::InstallEssentials),
        Box::new(nodejs::InstallNvm),
        Box::new(python::InstallPyenv),
        Box::new(editor::ConfigureVsCode),
    ]
}

/// Gate and execute a single step, recording the outcome.
///
/// A disabled gate or an inapplicable host records a skip and succeeds.
///
/// # Errors
///
/// Returns an error when the capability key is absent at gate time or the
/// step itself fails; either way the failure is recorded before it
/// propagates, so the caller can still print a summary.
pub fn execute(step: &dyn Step, ctx: &Context) -> Result<()> {
    let enabled = match ctx.config.gate(step.capability()) {
        Ok(enabled) => enabled,
        Err(e) => {
            ctx.log.error(&format!("{}: {e}", step.name()));
            ctx.log
                .record_step(step.name(), StepStatus::Failed, Some(&e.to_string()));
            return Err(e.into());
        }
    };

    if !enabled {
        ctx.log.info(&format!(
            "{} disabled in configuration, skipping {}",
            step.capability(),
            step.name()
        ));
        ctx.log
            .record_step(step.name(), StepStatus::Skipped, Some("disabled"));
        return Ok(());
    }

    if !step.applicable(ctx) {
        ctx.log
            .debug(&format!("skipping step: {} (not applicable)", step.name()));
        ctx.log
            .record_step(step.name(), StepStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(step.name());

    match step.run(ctx) {
        Ok(StepResult::Ok) => {
            ctx.log.record_step(step.name(), StepStatus::Ok, None);
            Ok(())
        }
        Ok(StepResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_step(step.name(), StepStatus::Skipped, Some(&reason));
            Ok(())
        }
        Ok(StepResult::DryRun) => {
            ctx.log.record_step(step.name(), StepStatus::DryRun, None);
            Ok(())
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", step.name()));
            ctx.log
                .record_step(step.name(), StepStatus::Failed, Some(&format!("{e:#}")));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::path::Path;

    use crate::config::test_fixtures::uniform_config;

    /// A mock step for exercising `execute()`.
    struct MockStep {
        name: &'static str,
        capability: Capability,
        applicable: bool,
        result: Result<(), String>,
        runs: Cell<u32>,
    }

    impl MockStep {
        fn new(capability: Capability) -> Self {
            Self {
                name: "mock-step",
                capability,
                applicable: true,
                result: Ok(()),
                runs: Cell::new(0),
            }
        }
    }

    impl Step for MockStep {
        fn name(&self) -> &'static str {
            self.name
        }
        fn capability(&self) -> Capability {
            self.capability
        }
        fn applicable(&self, _ctx: &Context) -> bool {
            self.applicable
        }
        fn run(&self, _ctx: &Context) -> Result<StepResult> {
            self.runs.set(self.runs.get() + 1);
            match &self.result {
                Ok(()) => Ok(StepResult::Ok),
                Err(msg) => Err(anyhow::anyhow!("{msg}")),
            }
        }
    }

    fn with_context<T>(config: &Config, f: impl FnOnce(&Context) -> T) -> T {
        let platform = Platform::new(false, true);
        let identity = Identity::for_tests("tester", Path::new("/tmp"));
        let log = Logger::new(false, "test-steps");
        let ctx = Context {
            config,
            platform: &platform,
            identity: &identity,
            log: &log,
            dry_run: false,
        };
        f(&ctx)
    }

    #[test]
    fn disabled_capability_skips_without_side_effects() {
        let config = uniform_config(false);
        let step = MockStep::new(Capability::UpdatePackages);
        with_context(&config, |ctx| {
            execute(&step, ctx).expect("a disabled gate is not a failure");
            assert_eq!(ctx.log.failure_count(), 0);
        });
        assert_eq!(step.runs.get(), 0, "disabled step must not run at all");
    }

    #[test]
    fn enabled_capability_runs_exactly_once() {
        let config = uniform_config(true);
        let step = MockStep::new(Capability::Nvm);
        with_context(&config, |ctx| {
            execute(&step, ctx).expect("step should succeed");
        });
        assert_eq!(step.runs.get(), 1);
    }

    #[test]
    fn absent_capability_key_is_fatal() {
        let config = Config::default();
        let step = MockStep::new(Capability::Nvm);
        with_context(&config, |ctx| {
            let err = execute(&step, ctx).expect_err("absent key must error");
            assert!(err.to_string().contains("nodejs.nvm"));
            assert_eq!(ctx.log.failure_count(), 1);
        });
        assert_eq!(step.runs.get(), 0, "gate failure must prevent the run");
    }

    #[test]
    fn step_failure_is_recorded_and_propagated() {
        let config = uniform_config(true);
        let mut step = MockStep::new(Capability::Pyenv);
        step.result = Err("kaboom".to_string());
        with_context(&config, |ctx| {
            let err = execute(&step, ctx).expect_err("step error must propagate");
            assert!(err.to_string().contains("kaboom"));
            assert_eq!(ctx.log.failure_count(), 1);
        });
    }

    #[test]
    fn inapplicable_step_records_not_applicable() {
        let config = uniform_config(true);
        let mut step = MockStep::new(Capability::VsCode);
        step.applicable = false;
        with_context(&config, |ctx| {
            execute(&step, ctx).expect("inapplicable step is not a failure");
            assert_eq!(ctx.log.failure_count(), 0);
        });
        assert_eq!(step.runs.get(), 0);
    }

    #[test]
    fn failing_dispatch_halts_later_steps() {
        let config = uniform_config(true);
        let failing = {
            let mut s = MockStep::new(Capability::UpdatePackages);
            s.result = Err("apt broke".to_string());
            s
        };
        let later = MockStep::new(Capability::Nvm);

        with_context(&config, |ctx| {
            let steps: [&dyn Step; 2] = [&failing, &later];
            let mut dispatch = || -> Result<()> {
                for step in steps {
                    execute(step, ctx)?;
                }
                Ok(())
            };
            assert!(dispatch().is_err());
        });
        assert_eq!(failing.runs.get(), 1);
        assert_eq!(later.runs.get(), 0, "steps after the failure must not run");
    }

    #[test]
    fn step_list_covers_every_capability_exactly_once() {
        let steps = all_steps();
        assert_eq!(steps.len(), Capability::ALL.len());

        let covered: HashSet<Capability> = steps.iter().map(|s| s.capability()).collect();
        assert_eq!(
            covered,
            Capability::ALL.into_iter().collect::<HashSet<_>>(),
            "every capability needs exactly one step, and vice versa"
        );
    }

    #[test]
    fn step_names_are_unique_and_non_empty() {
        let steps = all_steps();
        let mut seen = HashSet::new();
        for step in &steps {
            assert!(!step.name().is_empty());
            assert!(seen.insert(step.name()), "duplicate step name: {}", step.name());
        }
    }
}
