//! Host Runner Command Construction.
//!
//! Builds the argument vector that starts the host runner on one target.
//! The arguments are passed straight to the child process; nothing is ever
//! interpreted by a shell.

use crate::config::{RunConfig, Selection};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

pub const CORE_NUM_FLAG: &str = "--core-num";
pub const ROM_FLAG: &str = "--rom";
pub const ASSEMBLY_TESTS_FLAG: &str = "--assembly-tests";
pub const ELF_FLAG: &str = "--elf";

/// A fully built host runner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl HostCommand {
    /// Builds `--core-num N --rom ROM [--assembly-tests] --elf TARGET`.
    ///
    /// `--assembly-tests` is only passed for the ISA categories.
    pub fn build(config: &RunConfig, target: &Path) -> Self {
        let mut args: Vec<OsString> = vec![
            CORE_NUM_FLAG.into(),
            config.cores.to_string().into(),
            ROM_FLAG.into(),
            config.rom.clone().into_os_string(),
        ];
        if let Selection::Category(category) = config.selection {
            if category.is_isa() {
                args.push(ASSEMBLY_TESTS_FLAG.into());
            }
        }
        args.push(ELF_FLAG.into());
        args.push(target.as_os_str().to_os_string());

        Self {
            program: config.exe.clone(),
            args,
        }
    }

    /// Returns the value following `flag`, if the flag is present.
    pub fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
