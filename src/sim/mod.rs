//! Test harness: catalog resolution, command construction, and execution.

/// Built-in test catalogs and target sets.
pub mod catalog;

/// Host runner argument vectors.
pub mod command;

/// Sequential fail-fast execution of a target set.
pub mod runner;

pub use catalog::{Catalog, TargetSet, TestId};
pub use command::HostCommand;
pub use runner::{Launcher, OutputSink, ProcessLauncher, RunState, Runner, TargetOutcome};
