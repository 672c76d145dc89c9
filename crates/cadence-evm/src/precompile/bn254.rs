//! alt_bn128 G1 addition and scalar multiplication

use super::PrecompiledContract;
use crate::context::CallContext;
use bytes::Bytes;
use cadence_crypto::bn254::Bn254Backend;
use cadence_primitives::Gas;
use std::sync::Arc;

/// Point addition. The flat price dropped from 500 to 150 at Istanbul.
#[derive(Debug, Clone)]
pub struct AltBn128Add {
    gas: Gas,
    backend: Arc<dyn Bn254Backend>,
}

impl AltBn128Add {
    /// Byzantium pricing
    pub fn byzantium(backend: Arc<dyn Bn254Backend>) -> Self {
        Self { gas: 500, backend }
    }

    /// Istanbul pricing
    pub fn istanbul(backend: Arc<dyn Bn254Backend>) -> Self {
        Self { gas: 150, backend }
    }
}

impl PrecompiledContract for AltBn128Add {
    fn name(&self) -> &'static str {
        "AltBN128Add"
    }

    fn gas_requirement(&self, _input: &[u8]) -> Gas {
        self.gas
    }

    fn compute(&self, input: &[u8], _call: &CallContext) -> Option<Bytes> {
        self.backend
            .g1_add(input)
            .map(|point| Bytes::copy_from_slice(&point))
    }
}

/// Scalar multiplication of a G1 point. Input is `x || y || scalar`, each a
/// 32-byte big-endian word; missing bytes read as zero. Rejects points that
/// are off the curve or have a coordinate outside the base field.
#[derive(Debug, Clone)]
pub struct AltBn128Mul {
    gas: Gas,
    backend: Arc<dyn Bn254Backend>,
}

impl AltBn128Mul {
    /// Byzantium pricing (40 000)
    pub fn byzantium(backend: Arc<dyn Bn254Backend>) -> Self {
        Self {
            gas: 40_000,
            backend,
        }
    }

    /// Istanbul pricing (6 000)
    pub fn istanbul(backend: Arc<dyn Bn254Backend>) -> Self {
        Self { gas: 6_000, backend }
    }

    /// Backend doing the arithmetic
    pub fn backend(&self) -> &Arc<dyn Bn254Backend> {
        &self.backend
    }
}

impl PrecompiledContract for AltBn128Mul {
    fn name(&self) -> &'static str {
        "AltBN128Mul"
    }

    fn gas_requirement(&self, _input: &[u8]) -> Gas {
        self.gas
    }

    fn compute(&self, input: &[u8], _call: &CallContext) -> Option<Bytes> {
        self.backend
            .g1_mul(input)
            .map(|point| Bytes::copy_from_slice(&point))
    }
}
