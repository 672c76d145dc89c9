//! Precompiled contracts and their per-fork registry

mod bn254;
mod identity;

pub use bn254::{AltBn128Add, AltBn128Mul};
pub use identity::Identity;

use crate::context::CallContext;
use crate::fork::Fork;
use bytes::Bytes;
use cadence_crypto::bn254::Bn254Backend;
use cadence_primitives::{Address, Gas};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Identity (data copy)
pub const IDENTITY_ADDRESS: Address = Address::from_low_u64_be(0x04);

/// alt_bn128 point addition
pub const ALT_BN128_ADD_ADDRESS: Address = Address::from_low_u64_be(0x06);

/// alt_bn128 scalar multiplication
pub const ALT_BN128_MUL_ADDRESS: Address = Address::from_low_u64_be(0x07);

/// Natively implemented contract at a fixed address
pub trait PrecompiledContract: Send + Sync + fmt::Debug {
    /// Human-readable name, used in logs
    fn name(&self) -> &'static str;

    /// Gas charged for `input`; a pure function of the input
    fn gas_requirement(&self, input: &[u8]) -> Gas;

    /// Run the contract. `None` means the input was rejected, which is a
    /// normal call failure rather than a halt.
    fn compute(&self, input: &[u8], call: &CallContext) -> Option<Bytes>;
}

/// Result of calling a registered precompile
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrecompileOutcome {
    /// Computed an output
    Success {
        /// Output bytes
        output: Bytes,
        /// Gas requirement charged
        gas_used: Gas,
    },
    /// Input rejected; the requirement is still charged
    Rejected {
        /// Gas requirement charged
        gas_used: Gas,
    },
    /// Requirement exceeded the gas supplied; all of it is consumed
    OutOfGas {
        /// Gas supplied
        gas_used: Gas,
    },
}

impl PrecompileOutcome {
    /// Whether the call produced output
    pub fn is_success(&self) -> bool {
        matches!(self, PrecompileOutcome::Success { .. })
    }

    /// Gas consumed out of the amount supplied
    pub fn gas_used(&self) -> Gas {
        match self {
            PrecompileOutcome::Success { gas_used, .. }
            | PrecompileOutcome::Rejected { gas_used }
            | PrecompileOutcome::OutOfGas { gas_used } => *gas_used,
        }
    }

    /// Output bytes; empty unless successful
    pub fn output(&self) -> Bytes {
        match self {
            PrecompileOutcome::Success { output, .. } => output.clone(),
            _ => Bytes::new(),
        }
    }
}

/// Address to contract mapping, built once per fork and read-only afterwards
#[derive(Clone, Debug, Default)]
pub struct PrecompileRegistry {
    contracts: BTreeMap<Address, Arc<dyn PrecompiledContract>>,
}

impl PrecompileRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Contracts active at `fork`, with the curve arithmetic delegated to
    /// `backend`
    pub fn for_fork(fork: Fork, backend: Arc<dyn Bn254Backend>) -> Self {
        let mut registry = Self::new();
        registry.register(IDENTITY_ADDRESS, Arc::new(Identity));
        let (add, mul) = if fork.is_enabled(Fork::Istanbul) {
            (
                AltBn128Add::istanbul(Arc::clone(&backend)),
                AltBn128Mul::istanbul(backend),
            )
        } else {
            (
                AltBn128Add::byzantium(Arc::clone(&backend)),
                AltBn128Mul::byzantium(backend),
            )
        };
        registry.register(ALT_BN128_ADD_ADDRESS, Arc::new(add));
        registry.register(ALT_BN128_MUL_ADDRESS, Arc::new(mul));
        registry
    }

    /// Bind `contract` to `address`, replacing any previous binding
    pub fn register(&mut self, address: Address, contract: Arc<dyn PrecompiledContract>) {
        self.contracts.insert(address, contract);
    }

    /// Contract at `address`
    pub fn get(&self, address: &Address) -> Option<&Arc<dyn PrecompiledContract>> {
        self.contracts.get(address)
    }

    /// Whether `address` is a precompile
    pub fn contains(&self, address: &Address) -> bool {
        self.contracts.contains_key(address)
    }

    /// Registered addresses, ascending
    pub fn addresses(&self) -> impl Iterator<Item = &Address> + '_ {
        self.contracts.keys()
    }

    /// Number of registered contracts
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Call the contract at `address` with `gas` available. `None` when no
    /// contract is registered there.
    pub fn call(
        &self,
        address: &Address,
        input: &[u8],
        gas: Gas,
        call: &CallContext,
    ) -> Option<PrecompileOutcome> {
        let contract = self.contracts.get(address)?;
        let requirement = contract.gas_requirement(input);
        trace!(
            precompile = contract.name(),
            gas = requirement,
            available = gas,
            "Calling precompile"
        );

        if requirement > gas {
            debug!(
                precompile = contract.name(),
                requirement,
                available = gas,
                "Precompile out of gas"
            );
            return Some(PrecompileOutcome::OutOfGas { gas_used: gas });
        }

        Some(match contract.compute(input, call) {
            Some(output) => PrecompileOutcome::Success {
                output,
                gas_used: requirement,
            },
            None => {
                debug!(
                    precompile = contract.name(),
                    input_len = input.len(),
                    "Precompile rejected input"
                );
                PrecompileOutcome::Rejected {
                    gas_used: requirement,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_crypto::bn254::PortableBn254;

    fn registry(fork: Fork) -> PrecompileRegistry {
        PrecompileRegistry::for_fork(fork, Arc::new(PortableBn254))
    }

    fn generator_times(scalar: u8) -> Vec<u8> {
        let mut input = vec![0u8; 96];
        input[31] = 1;
        input[63] = 2;
        input[95] = scalar;
        input
    }

    fn call_mul(r: &PrecompileRegistry, input: &[u8], gas: Gas) -> PrecompileOutcome {
        let ctx = CallContext::default();
        r.call(&ALT_BN128_MUL_ADDRESS, input, gas, &ctx).unwrap()
    }

    #[test]
    fn test_registry_contents() {
        let r = registry(Fork::Shanghai);
        assert_eq!(r.len(), 3);
        assert!(r.contains(&ALT_BN128_MUL_ADDRESS));
        assert!(!r.contains(&Address::from_low_u64_be(0x05)));
        assert_eq!(r.get(&IDENTITY_ADDRESS).unwrap().name(), "Identity");
        let low_bytes: Vec<u8> = r.addresses().map(|a| a.as_bytes()[19]).collect();
        assert_eq!(low_bytes, [0x04, 0x06, 0x07]);
    }

    #[test]
    fn test_mul_cost_by_fork() {
        let input = generator_times(2);
        let mul = |fork| {
            let r = registry(fork);
            let contract = r.get(&ALT_BN128_MUL_ADDRESS).unwrap();
            contract.gas_requirement(&input)
        };
        assert_eq!(mul(Fork::Byzantium), 40_000);
        assert_eq!(mul(Fork::Constantinople), 40_000);
        assert_eq!(mul(Fork::Istanbul), 6_000);
        assert_eq!(mul(Fork::Shanghai), 6_000);
    }

    #[test]
    fn test_call_success() {
        let r = registry(Fork::Istanbul);
        let outcome = call_mul(&r, &generator_times(1), 10_000);
        assert!(outcome.is_success());
        assert_eq!(outcome.gas_used(), 6_000);
        assert_eq!(&outcome.output()[..], &generator_times(0)[..64]);
    }

    #[test]
    fn test_call_rejected_charges_requirement() {
        let r = registry(Fork::Istanbul);
        let mut input = vec![0u8; 96];
        input[31] = 1;
        input[63] = 1;
        input[95] = 2;
        let outcome = call_mul(&r, &input, 10_000);
        assert_eq!(outcome, PrecompileOutcome::Rejected { gas_used: 6_000 });
        assert!(outcome.output().is_empty());
    }

    #[test]
    fn test_call_out_of_gas_consumes_supplied() {
        let r = registry(Fork::Byzantium);
        let outcome = call_mul(&r, &generator_times(1), 39_999);
        assert_eq!(outcome, PrecompileOutcome::OutOfGas { gas_used: 39_999 });
    }

    #[test]
    fn test_call_unregistered() {
        let r = registry(Fork::Shanghai);
        let (unknown, ctx) = (Address::from_low_u64_be(0x99), CallContext::default());
        assert!(r.call(&unknown, &[], 100, &ctx).is_none());
    }
}
