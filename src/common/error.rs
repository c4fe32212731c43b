//! Harness error kinds.
//!
//! Configuration errors are raised before any target runs. A child failure
//! is raised by the runner for a single target and ends the whole run.
//! Missing artifacts are not errors at all; the runner skips them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring or running a test batch.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required environment variable is not set.
    #[error("environment variable {0} is not set; it must point at the RISC-V tools installation")]
    MissingEnv(&'static str),

    /// A required setting was given neither on the command line nor in the config file.
    #[error("missing required argument --{0}")]
    MissingArgument(&'static str),

    /// A setting has a value the host runner cannot accept.
    #[error("invalid value for --{name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The config file could not be read or parsed.
    #[error("failed to load config file {}: {reason}", .path.display())]
    ConfigFile { path: PathBuf, reason: String },

    /// The invocation directory could not be determined.
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// A catalog glob pattern was malformed or a matched entry was unreadable.
    #[error("failed to enumerate tests matching {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// The output directory could not be created or resolved.
    #[error("failed to prepare output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host runner could not be started for a target.
    #[error("failed to launch host runner for {}: {source}", .target.display())]
    Spawn {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host runner exited unsuccessfully for a target.
    #[error("test {} failed ({})", .target.display(), describe_exit(.code))]
    ChildFailed { target: PathBuf, code: Option<i32> },
}

impl HarnessError {
    /// Returns true for errors raised before any target is run.
    pub fn is_config(&self) -> bool {
        !matches!(
            self,
            HarnessError::Spawn { .. } | HarnessError::ChildFailed { .. }
        )
    }

    /// Returns the process exit code this error should terminate with.
    ///
    /// A failing child's own exit code is propagated. A child killed by a
    /// signal, a spawn failure, and every configuration error map to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::ChildFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
