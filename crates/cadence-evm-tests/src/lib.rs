//! # cadence-evm-tests
//!
//! JSON fixture runner for the cadence execution engine.
//!
//! This crate provides:
//! - JSON parsing for VM and precompile fixtures
//! - A VM runner that executes bytecode and checks outcome, gas and output
//! - A precompile runner that calls the registry directly
//! - Result aggregation and reporting
//!
//! ## Fixture Formats
//!
//! ### VMTests
//! A map of test name to `{ fork?, exec: { code, gas, data?, address?, caller? },
//! outcome?, gas?, out? }`. `gas` is the gas remaining after execution.
//!
//! ### PrecompileTests
//! A map of test name to `{ fork?, address, input, expected?, gas, gasLimit?, outOfGas? }`.
//! A missing `expected` means the input must be rejected.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod precompile_test;
mod runner;
mod types;

pub use error::{TestError, TestResult};
pub use precompile_test::{PrecompileTestRunner, DEFAULT_GAS_LIMIT};
pub use runner::{FixtureKind, TestRunner, TestStats};
pub use types::*;
pub use vm_test::{FileResults, VmTestRunner};
