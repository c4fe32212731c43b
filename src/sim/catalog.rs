//! Test Catalog Resolution.
//!
//! This module locates the pre-built test artifacts for each built-in
//! category under the RISC-V tools installation, and turns them into the
//! ordered set of target paths the runner executes.

use crate::common::{HarnessError, TestCategory};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable holding the RISC-V tools installation root.
pub const TOOLS_ROOT_ENV: &str = "RISCY_TOOLS_FESVR";

/// Benchmark programs run by the `benchmarks` category, in run order.
pub const BENCHMARKS: [&str; 9] = [
    "median.riscv",
    "multiply.riscv",
    "qsort.riscv",
    "vvadd.riscv",
    "towers.riscv",
    "dhrystone.riscv",
    "sort.riscv",
    "rsort.riscv",
    "security_flush.riscv",
];

/// Benchmarks that are built but excluded from runs.
///
/// Move an entry into [`BENCHMARKS`] to enable it again.
pub const DISABLED_BENCHMARKS: [&str; 1] = ["spmv.riscv"];

const ASSEMBLY_PATTERN: &str = "rv64ui-p-*.dump";
const ASSEMBLY_FP_PATTERN: &str = "rv64uf-p-*.dump";

/// Name of a single test, taken from a dump file stem or the benchmark list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestId(String);

impl TestId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered sequence of target executables for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    targets: Vec<PathBuf>,
}

impl TargetSet {
    /// A set holding one literal executable path.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            targets: vec![path.into()],
        }
    }

    /// Joins each test identifier onto the directory holding its artifact.
    pub fn from_tests(test_dir: &Path, tests: &[TestId]) -> Self {
        Self {
            targets: tests.iter().map(|t| test_dir.join(t.as_str())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.targets.iter().map(PathBuf::as_path)
    }
}

/// Reads the tools root from [`TOOLS_ROOT_ENV`].
pub fn tools_root_from_env() -> Result<PathBuf, HarnessError> {
    tools_root_from(|key| env::var_os(key))
}

/// Reads the tools root through `lookup`, treating an empty value as unset.
pub fn tools_root_from<F>(lookup: F) -> Result<PathBuf, HarnessError>
where
    F: Fn(&str) -> Option<OsString>,
{
    match lookup(TOOLS_ROOT_ENV) {
        Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
        _ => Err(HarnessError::MissingEnv(TOOLS_ROOT_ENV)),
    }
}

/// Built-in test catalog rooted at a tools installation.
#[derive(Debug, Clone)]
pub struct Catalog {
    test_bin_dir: PathBuf,
}

impl Catalog {
    pub fn new(tools_root: &Path) -> Self {
        Self {
            test_bin_dir: tools_root
                .join("riscv64-unknown-elf")
                .join("share")
                .join("riscv-tests"),
        }
    }

    /// Root of the installed riscv-tests tree.
    pub fn test_bin_dir(&self) -> &Path {
        &self.test_bin_dir
    }

    /// Directory holding the executables of a category.
    pub fn test_dir(&self, category: TestCategory) -> PathBuf {
        match category {
            TestCategory::Assembly | TestCategory::AssemblyFp => self.test_bin_dir.join("isa"),
            TestCategory::Benchmarks => self.test_bin_dir.join("benchmarks"),
        }
    }

    /// Lists the tests of a category.
    ///
    /// ISA categories are globbed from the dump files on disk and keep the
    /// enumeration order; benchmarks come from the fixed list.
    pub fn tests(&self, category: TestCategory) -> Result<Vec<TestId>, HarnessError> {
        match category {
            TestCategory::Assembly => glob_stems(&self.test_dir(category), ASSEMBLY_PATTERN),
            TestCategory::AssemblyFp => glob_stems(&self.test_dir(category), ASSEMBLY_FP_PATTERN),
            TestCategory::Benchmarks => Ok(BENCHMARKS.iter().copied().map(TestId::new).collect()),
        }
    }

    /// Resolves a category into target executable paths.
    pub fn targets(&self, category: TestCategory) -> Result<TargetSet, HarnessError> {
        let tests = self.tests(category)?;
        tracing::debug!(%category, count = tests.len(), "resolved test catalog");
        Ok(TargetSet::from_tests(&self.test_dir(category), &tests))
    }
}

fn glob_stems(dir: &Path, pattern: &str) -> Result<Vec<TestId>, HarnessError> {
    let dir_str = dir.to_str().ok_or_else(|| HarnessError::Pattern {
        pattern: dir.join(pattern).to_string_lossy().into_owned(),
        reason: "test directory is not valid UTF-8".to_string(),
    })?;
    let full = Path::new(&glob::Pattern::escape(dir_str)).join(pattern);
    let full = full.to_string_lossy();

    let entries = glob::glob(&full).map_err(|e| HarnessError::Pattern {
        pattern: full.to_string(),
        reason: e.to_string(),
    })?;

    let mut tests = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| HarnessError::Pattern {
            pattern: full.to_string(),
            reason: e.to_string(),
        })?;
        if let Some(stem) = path.file_stem() {
            tests.push(TestId::new(stem.to_string_lossy()));
        }
    }
    Ok(tests)
}
