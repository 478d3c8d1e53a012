//! Integration tests for authz-engine
//!
//! These tests drive the public API end to end with real fixtures.

pub mod chain_tests;
pub mod checker_tests;
pub mod config_tests;
pub mod error_handling_tests;
