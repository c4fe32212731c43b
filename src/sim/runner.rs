//! Test Execution.
//!
//! The runner resolves the target set, prepares the output directory, and
//! starts the host runner once per target. A missing artifact is skipped;
//! the first failing target ends the run and no further targets are started.
//!
//! Process creation sits behind the [`Launcher`] trait so the run loop can be
//! driven without spawning real processes.

use crate::common::HarnessError;
use crate::config::{RunConfig, Selection};
use crate::sim::catalog::{self, Catalog, TargetSet};
use crate::sim::command::HostCommand;
use crate::stats::RunStats;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Log file written inside the output directory when logging is enabled.
pub const LOG_FILE: &str = "log.txt";

/// Where the host runner's stdout and stderr go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Discard,
    /// Truncated at the start of every invocation.
    LogFile(PathBuf),
}

impl OutputSink {
    pub fn for_dir(out_dir: &Path, log: bool) -> Self {
        if log {
            OutputSink::LogFile(out_dir.join(LOG_FILE))
        } else {
            OutputSink::Discard
        }
    }

    /// Opens the sink as a (stdout, stderr) pair.
    pub fn open(&self) -> io::Result<(Stdio, Stdio)> {
        match self {
            OutputSink::Discard => Ok((Stdio::null(), Stdio::null())),
            OutputSink::LogFile(path) => {
                let stdout = File::create(path)?;
                let stderr = stdout.try_clone()?;
                Ok((Stdio::from(stdout), Stdio::from(stderr)))
            }
        }
    }
}

/// Exit information of a finished host runner invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl Completion {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Starts the host runner and waits for it to finish.
pub trait Launcher {
    fn launch(
        &mut self,
        command: &HostCommand,
        work_dir: &Path,
        sink: &OutputSink,
    ) -> io::Result<Completion>;
}

/// Launcher that spawns a real child process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(
        &mut self,
        command: &HostCommand,
        work_dir: &Path,
        sink: &OutputSink,
    ) -> io::Result<Completion> {
        let (stdout, stderr) = sink.open()?;
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()?;
        Ok(Completion {
            code: status.code(),
        })
    }
}

/// Result of handling a single target that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    Passed,
    /// The artifact does not exist on disk.
    Skipped,
    /// Dry run; the command was printed but not started.
    Planned,
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Resolving,
    Running,
    Done,
    Aborted,
}

/// Drives one batch of targets through a [`Launcher`].
pub struct Runner<L> {
    config: RunConfig,
    launcher: L,
    state: RunState,
}

impl<L: Launcher> Runner<L> {
    pub fn new(config: RunConfig, launcher: L) -> Self {
        Self {
            config,
            launcher,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Only suite runs keep a log; a literal ELF's output is always discarded.
    pub fn logs_output(&self) -> bool {
        self.config.log && self.config.category().is_some()
    }

    /// Resolves the configured selection into target paths.
    ///
    /// The tools root is only consulted for category runs, preferring the
    /// config file value over the environment.
    pub fn resolve_targets(&self) -> Result<TargetSet, HarnessError> {
        match &self.config.selection {
            Selection::Elf(path) => Ok(TargetSet::single(path.clone())),
            Selection::Category(category) => {
                let root = match &self.config.tools_root {
                    Some(root) => root.clone(),
                    None => catalog::tools_root_from_env()?,
                };
                Catalog::new(&root).targets(*category)
            }
        }
    }

    /// Creates the output directory if it does not exist yet.
    pub fn prepare_output_dir(&self) -> Result<PathBuf, HarnessError> {
        let dir = self.config.output_dir();
        fs::create_dir_all(&dir).map_err(|source| HarnessError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %dir.display(), "output directory ready");
        Ok(dir)
    }

    /// Runs one target.
    ///
    /// Returns `Err` only when the host runner could not be started or
    /// exited unsuccessfully; the caller decides whether to continue.
    pub fn run_target(
        &mut self,
        target: &Path,
        out_dir: &Path,
    ) -> Result<TargetOutcome, HarnessError> {
        if !target.is_file() {
            println!("{} doesn't exist", target.display());
            tracing::warn!(target = %target.display(), "test artifact missing, skipped");
            return Ok(TargetOutcome::Skipped);
        }

        let command = HostCommand::build(&self.config, target);
        if self.config.dry_run {
            println!("Would run {} using \"{}\"", target.display(), command);
            return Ok(TargetOutcome::Planned);
        }

        println!("Run {} using \"{}\"", target.display(), command);
        let sink = OutputSink::for_dir(out_dir, self.logs_output());
        let completion = self
            .launcher
            .launch(&command, out_dir, &sink)
            .map_err(|source| HarnessError::Spawn {
                target: target.to_path_buf(),
                source,
            })?;

        if completion.success() {
            tracing::debug!(target = %target.display(), "test passed");
            Ok(TargetOutcome::Passed)
        } else {
            Err(HarnessError::ChildFailed {
                target: target.to_path_buf(),
                code: completion.code,
            })
        }
    }

    /// Runs every target in order, stopping at the first failure.
    pub fn run(&mut self) -> Result<RunStats, HarnessError> {
        let result = self.execute();
        self.state = match &result {
            Ok(_) => RunState::Done,
            Err(_) => RunState::Aborted,
        };
        result
    }

    fn execute(&mut self) -> Result<RunStats, HarnessError> {
        self.state = RunState::Resolving;
        let targets = self.resolve_targets()?;

        let out_dir = if self.config.dry_run {
            self.config.output_dir()
        } else {
            self.prepare_output_dir()?
        };

        self.state = RunState::Running;
        let mut stats = RunStats::default();
        for target in targets.iter() {
            match self.run_target(target, &out_dir)? {
                TargetOutcome::Passed => stats.invoked += 1,
                TargetOutcome::Skipped => stats.skipped += 1,
                TargetOutcome::Planned => {}
            }
        }
        stats.log();
        Ok(stats)
    }
}
