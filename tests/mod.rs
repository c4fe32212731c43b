//! Test module organization.
//!
//! This module organizes all integration tests for the RISC-V test runner.

/// Test catalog resolution tests.
mod catalog_tests;
