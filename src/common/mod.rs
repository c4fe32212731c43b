//! Common types shared by the catalog, command builder, and runner.
//!
//! This module provides the test category selector and the error type that
//! every fallible operation in the harness returns.

/// Test category definitions.
pub mod data;

/// Error kinds and exit code mapping.
pub mod error;

pub use data::TestCategory;
pub use error::HarnessError;
