//! Fixture file formats

use cadence_evm::{HaltReason, Outcome};
use cadence_primitives::Address;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

fn hex_digits(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Hex-encoded bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let s = hex_digits(&s);
        if s.is_empty() {
            return Ok(HexBytes(Vec::new()));
        }
        hex::decode(s)
            .map(HexBytes)
            .map_err(serde::de::Error::custom)
    }
}

/// Hex-encoded u64
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexU64(pub u64);

impl<'de> Deserialize<'de> for HexU64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let s = hex_digits(&s);
        if s.is_empty() {
            return Ok(HexU64(0));
        }
        u64::from_str_radix(s, 16)
            .map(HexU64)
            .map_err(serde::de::Error::custom)
    }
}

/// Hex-encoded address (20 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HexAddress(pub [u8; 20]);

impl HexAddress {
    /// Engine address type
    pub fn to_address(self) -> Address {
        Address::from_bytes(self.0)
    }
}

impl<'de> Deserialize<'de> for HexAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = hex::decode(hex_digits(&s)).map_err(serde::de::Error::custom)?;
        if bytes.len() > 20 {
            return Err(serde::de::Error::custom(format!(
                "invalid address length: {}",
                bytes.len()
            )));
        }
        // Short forms such as "0x07" name the low bytes
        let mut result = [0u8; 20];
        result[20 - bytes.len()..].copy_from_slice(&bytes);
        Ok(HexAddress(result))
    }
}

// =============================================================================
// VM Test Types
// =============================================================================

/// VM fixture file (map of test name -> test case)
pub type VmTestFile = HashMap<String, VmTestCase>;

/// How a VM fixture is expected to end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpectedOutcome {
    /// STOP, RETURN or running off the end of the code
    #[default]
    Success,
    /// REVERT
    Revert,
    /// Ran out of gas
    InsufficientGas,
    /// Jump to a non-JUMPDEST
    InvalidJumpDestination,
    /// Too few stack items
    StackUnderflow,
    /// Stack limit exceeded
    StackOverflow,
    /// Undefined opcode or INVALID
    InvalidOperation,
    /// Unaddressable memory region
    OutOfBounds,
    /// RETURNDATACOPY past the buffer
    InvalidReturnDataAccess,
}

impl ExpectedOutcome {
    /// Whether `outcome` is what the fixture asks for
    pub fn matches(self, outcome: &Outcome) -> bool {
        match (self, outcome) {
            (ExpectedOutcome::Success, Outcome::Success) => true,
            (ExpectedOutcome::Revert, Outcome::Revert) => true,
            (expected, Outcome::Halt(reason)) => expected.halt_matches(*reason),
            _ => false,
        }
    }

    fn halt_matches(self, reason: HaltReason) -> bool {
        matches!(
            (self, reason),
            (ExpectedOutcome::InsufficientGas, HaltReason::InsufficientGas)
                | (ExpectedOutcome::InvalidJumpDestination, HaltReason::InvalidJumpDestination)
                | (ExpectedOutcome::StackUnderflow, HaltReason::StackUnderflow)
                | (ExpectedOutcome::StackOverflow, HaltReason::StackOverflow)
                | (ExpectedOutcome::InvalidOperation, HaltReason::InvalidOperation(_))
                | (ExpectedOutcome::OutOfBounds, HaltReason::OutOfBounds)
                | (ExpectedOutcome::InvalidReturnDataAccess, HaltReason::InvalidReturnDataAccess)
        )
    }
}

/// Single VM test case
#[derive(Debug, Deserialize)]
pub struct VmTestCase {
    /// Fork to execute under (engine default when absent)
    pub fork: Option<String>,
    /// Execution parameters
    pub exec: VmExec,
    /// Expected outcome
    #[serde(default)]
    pub outcome: ExpectedOutcome,
    /// Expected gas remaining
    pub gas: Option<HexU64>,
    /// Expected output
    pub out: Option<HexBytes>,
}

/// VM test execution parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmExec {
    /// Address of the executing account
    #[serde(default)]
    pub address: HexAddress,
    /// Caller address
    #[serde(default)]
    pub caller: HexAddress,
    /// Code to execute
    pub code: HexBytes,
    /// Input data
    #[serde(default)]
    pub data: HexBytes,
    /// Gas provided
    pub gas: HexU64,
}

// =============================================================================
// Precompile Test Types
// =============================================================================

/// Precompile fixture file (map of test name -> test case)
pub type PrecompileTestFile = HashMap<String, PrecompileTestCase>;

/// Single precompile call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecompileTestCase {
    /// Fork whose registry is used (engine default when absent)
    pub fork: Option<String>,
    /// Precompile address
    pub address: HexAddress,
    /// Call input
    #[serde(default)]
    pub input: HexBytes,
    /// Output on acceptance; absent when the input is rejected
    pub expected: Option<HexBytes>,
    /// Gas the call should report as used
    pub gas: u64,
    /// Gas supplied to the call
    pub gas_limit: Option<u64>,
    /// The supplied gas is below the requirement
    #[serde(default)]
    pub out_of_gas: bool,
}
