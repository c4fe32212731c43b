use crate::common::{HarnessError, TestCategory};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

const DEFAULT_OUT_DIR: &str = "out";

/// Optional defaults loaded from a TOML file passed with `--config`.
///
/// Every key may be omitted. Values given on the command line take
/// precedence over the file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    pub exe: Option<String>,
    pub rom: Option<String>,
    pub cores: Option<u32>,

    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,

    #[serde(default)]
    pub log: bool,

    pub tools_root: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            exe: None,
            rom: None,
            cores: None,
            outdir: default_outdir(),
            log: false,
            tools_root: None,
        }
    }
}

impl FileConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = fs::read_to_string(path).map_err(|e| HarnessError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|reason| HarnessError::ConfigFile {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parses config file contents.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

fn default_outdir() -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR)
}

/// Settings given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub exe: Option<String>,
    pub rom: Option<String>,
    pub cores: Option<u32>,
    pub outdir: Option<PathBuf>,
    pub log: bool,
    pub dry_run: bool,
}

/// What a run executes: a built-in suite or one literal executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Category(TestCategory),
    Elf(PathBuf),
}

/// Validated, immutable configuration for one run.
///
/// Every path is absolute, so the host runner can be started with its
/// working directory set to the output directory without changing how the
/// paths resolve.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub exe: PathBuf,
    pub rom: PathBuf,
    pub cores: u32,
    pub out_dir: PathBuf,
    pub log: bool,
    pub dry_run: bool,
    pub selection: Selection,
    pub tools_root: Option<PathBuf>,
}

impl RunConfig {
    /// Merges the config file with the command line and validates the result.
    ///
    /// `cwd` is the directory relative paths are resolved against.
    pub fn resolve(
        file: FileConfig,
        cli: Overrides,
        selection: Selection,
        cwd: &Path,
    ) -> Result<Self, HarnessError> {
        let (exe, rom, cores) = required_settings(&file, &cli)?;
        let out_dir = cli.outdir.unwrap_or(file.outdir);
        let selection = match selection {
            Selection::Elf(path) => Selection::Elf(cwd.join(path)),
            category => category,
        };

        Ok(Self {
            exe: resolve_exe(&exe, cwd),
            rom: cwd.join(rom),
            cores,
            out_dir: cwd.join(out_dir),
            log: cli.log || file.log,
            dry_run: cli.dry_run,
            selection,
            tools_root: file.tools_root.map(|root| cwd.join(root)),
        })
    }

    /// Checks that `exe`, `rom` and `cores` are set by the command line or
    /// the config file, without requiring a selection.
    pub fn check_required(file: &FileConfig, cli: &Overrides) -> Result<(), HarnessError> {
        required_settings(file, cli).map(|_| ())
    }

    /// Returns the selected category, or `None` in literal ELF mode.
    pub fn category(&self) -> Option<TestCategory> {
        match self.selection {
            Selection::Category(category) => Some(category),
            Selection::Elf(_) => None,
        }
    }

    /// Directory the host runner executes in and `log.txt` is written to.
    ///
    /// Category runs get a subdirectory named after the category.
    pub fn output_dir(&self) -> PathBuf {
        match self.selection {
            Selection::Category(category) => self.out_dir.join(category.as_str()),
            Selection::Elf(_) => self.out_dir.clone(),
        }
    }
}

fn required_settings(
    file: &FileConfig,
    cli: &Overrides,
) -> Result<(String, String, u32), HarnessError> {
    let exe = cli
        .exe
        .clone()
        .or_else(|| file.exe.clone())
        .ok_or(HarnessError::MissingArgument("exe"))?;
    let rom = cli
        .rom
        .clone()
        .or_else(|| file.rom.clone())
        .ok_or(HarnessError::MissingArgument("rom"))?;
    let cores = cli
        .cores
        .or(file.cores)
        .ok_or(HarnessError::MissingArgument("cores"))?;
    if cores == 0 {
        return Err(HarnessError::InvalidArgument {
            name: "cores",
            reason: "core count must be at least 1".to_string(),
        });
    }
    Ok((exe, rom, cores))
}

/// Bare program names are looked up on `PATH`; anything with a directory
/// component is taken relative to `cwd`.
///
/// A bare name that is not on `PATH` is kept as given. It only matters once a
/// target actually runs, where it surfaces as a launch failure.
fn resolve_exe(exe: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(exe);
    let mut components = path.components();
    let bare = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !bare {
        return cwd.join(path);
    }
    match which::which(exe) {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!(exe, error = %e, "host runner not found on PATH");
            PathBuf::from(exe)
        }
    }
}
