//! Precompile fixture runner

use crate::error::{TestError, TestResult};
use crate::types::*;
use crate::vm_test::{engine_for, FileResults};
use cadence_crypto::bn254::NativeMode;
use cadence_evm::{CallContext, PrecompileOutcome};
use cadence_primitives::Gas;
use std::path::Path;

/// Gas supplied when a fixture leaves the limit open
pub const DEFAULT_GAS_LIMIT: Gas = 10_000_000;

/// Precompile fixture runner
pub struct PrecompileTestRunner {
    /// Native alt_bn128 policy for the engines it builds
    native: NativeMode,
    /// Verbose output
    verbose: bool,
}

impl PrecompileTestRunner {
    /// Create new precompile fixture runner
    pub fn new(native: NativeMode, verbose: bool) -> Self {
        Self { native, verbose }
    }

    /// Run all tests in a file
    pub fn run_file(&self, path: &Path) -> TestResult<FileResults> {
        let content = std::fs::read_to_string(path)?;
        let tests: PrecompileTestFile = serde_json::from_str(&content)?;

        let mut results = FileResults::new(path.to_string_lossy().to_string());
        let mut names: Vec<_> = tests.keys().cloned().collect();
        names.sort();

        for name in names {
            let outcome = self.run_test(&name, &tests[&name]);
            results.record(name, outcome, self.verbose);
        }

        Ok(results)
    }

    /// Run a single call
    pub fn run_test(&self, name: &str, test: &PrecompileTestCase) -> TestResult<()> {
        let evm = engine_for(test.fork.as_deref(), self.native)?;
        let address = test.address.to_address();
        let gas = test.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT);
        let call = CallContext::new(address, Default::default(), test.input.0.clone(), gas);

        let outcome = evm
            .precompiles()
            .call(&address, &test.input.0, gas, &call)
            .ok_or_else(|| {
                TestError::Unsupported(format!("{}: no precompile at {}", name, address))
            })?;

        self.check_outcome(name, test, &outcome)
    }

    fn check_outcome(
        &self,
        name: &str,
        test: &PrecompileTestCase,
        outcome: &PrecompileOutcome,
    ) -> TestResult<()> {
        match (outcome, &test.expected, test.out_of_gas) {
            (PrecompileOutcome::Success { output, .. }, Some(expected), false) => {
                if output[..] != expected.0[..] {
                    return Err(TestError::Assertion(format!(
                        "{}: output mismatch: expected 0x{}, got 0x{}",
                        name,
                        hex::encode(&expected.0),
                        hex::encode(output)
                    )));
                }
            }
            (PrecompileOutcome::Rejected { .. }, None, false) => {}
            (PrecompileOutcome::OutOfGas { .. }, _, true) => {}
            (other, _, _) => {
                return Err(TestError::Assertion(format!(
                    "{}: unexpected outcome {:?}",
                    name, other
                )));
            }
        }

        if outcome.gas_used() != test.gas {
            return Err(TestError::Assertion(format!(
                "{}: gas mismatch: expected {}, got {}",
                name,
                test.gas,
                outcome.gas_used()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(json: &str) -> PrecompileTestCase {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_identity_call() {
        let test = case(
            r#"{
                "address": "0x04",
                "input": "0xc0ffee",
                "expected": "0xc0ffee",
                "gas": 18
            }"#,
        );
        PrecompileTestRunner::new(NativeMode::Disabled, false)
            .run_test("identity", &test)
            .unwrap();
    }

    #[test]
    fn test_rejection_must_be_expected() {
        // (1, 1) is not on the curve
        let input = format!("{:064x}{:064x}{:064x}", 1, 1, 2);
        let json = format!(
            r#"{{
                "fork": "istanbul",
                "address": "0x07",
                "input": "0x{}",
                "expected": "0x",
                "gas": 6000
            }}"#,
            input
        );
        let err = PrecompileTestRunner::new(NativeMode::Disabled, false)
            .run_test("bad point", &case(&json))
            .unwrap_err();
        assert!(err.to_string().contains("unexpected outcome"));
    }

    #[test]
    fn test_missing_precompile() {
        let test = case(r#"{ "address": "0x09", "gas": 0 }"#);
        let runner = PrecompileTestRunner::new(NativeMode::Disabled, false);
        let result = runner.run_test("blake2f", &test);
        assert!(matches!(result, Err(TestError::Unsupported(_))));
    }
}
