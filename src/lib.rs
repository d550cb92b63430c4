//! Sequential developer-environment provisioning engine.
//!
//! Reads a declarative TOML configuration of boolean capability switches,
//! validates that every known capability is explicitly decided, then runs
//! a fixed ordered sequence of idempotent installation steps — package
//! refresh/upgrade/essentials, Node and Python version managers, VS Code
//! WSL integration — followed by an ownership-repair sweep.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]** — typed configuration document, capability list,
//!   completeness validation, and the per-step gate
//! - **[`identity`]** / **[`exec`]** — execution principals and the
//!   process-invocation layer that takes them explicitly
//! - **[`steps`]** — the ordered, capability-gated provisioning steps
//! - **[`commands`]** — top-level subcommand orchestration (`apply`, `check`)

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod identity;
pub mod logging;
pub mod platform;
pub mod steps;
