//! Test Categories.
//!
//! This module defines the built-in test suites the harness knows how to
//! locate. The category decides which directory the artifacts live in,
//! how the target set is enumerated, and whether the host runner is told it
//! is executing ISA tests.

use clap::ValueEnum;
use std::fmt;

/// Built-in test suite selector.
///
/// The command-line names (`assembly`, `assembly_fp`, `benchmarks`) double
/// as the name of the per-category output subdirectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum TestCategory {
    /// Integer ISA conformance tests (`rv64ui-p-*`).
    #[value(name = "assembly")]
    Assembly,

    /// Floating-point ISA conformance tests (`rv64uf-p-*`).
    #[value(name = "assembly_fp")]
    AssemblyFp,

    /// Full benchmark programs from the fixed benchmark list.
    #[value(name = "benchmarks")]
    Benchmarks,
}

impl TestCategory {
    /// Returns the canonical name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            TestCategory::Assembly => "assembly",
            TestCategory::AssemblyFp => "assembly_fp",
            TestCategory::Benchmarks => "benchmarks",
        }
    }

    /// Returns true for the ISA categories, which run with `--assembly-tests`.
    pub fn is_isa(self) -> bool {
        matches!(self, TestCategory::Assembly | TestCategory::AssemblyFp)
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
