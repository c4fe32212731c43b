//! RISC-V Test Suite Runner Library.
//!
//! This crate drives a host-side RISC-V simulator over pre-built test
//! binaries: the ISA conformance suites from `riscv-tests`, the
//! floating-point ISA suite, the benchmark programs, or a single ELF.
//!
//! # Architecture
//!
//! * **Catalog**: locates test artifacts under the tools installation.
//! * **Command**: builds the host runner argument vector for one target.
//! * **Runner**: runs targets one at a time and stops at the first failure.
//!
//! # Modules
//!
//! * `common`: Test categories and error handling.
//! * `config`: Configuration loading, merging, and validation.
//! * `sim`: Catalog, command construction, and execution.
//! * `stats`: Run statistics.

/// Test categories and the harness error type.
pub mod common;

/// Configuration system for the harness.
///
/// Merges an optional TOML file with command-line settings and validates
/// the result into an immutable run configuration.
pub mod config;

/// Test catalog resolution, host runner command construction, and the
/// fail-fast execution loop.
pub mod sim;

/// Run statistics collection and reporting.
pub mod stats;
