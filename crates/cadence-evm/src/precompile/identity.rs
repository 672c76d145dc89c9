use super::PrecompiledContract;
use crate::context::CallContext;
use crate::gas::words;
use bytes::Bytes;
use cadence_primitives::Gas;

const BASE: Gas = 15;
const PER_WORD: Gas = 3;

/// Returns its input unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl PrecompiledContract for Identity {
    fn name(&self) -> &'static str {
        "Identity"
    }

    fn gas_requirement(&self, input: &[u8]) -> Gas {
        BASE.saturating_add(PER_WORD.saturating_mul(words(input.len())))
    }

    fn compute(&self, input: &[u8], _call: &CallContext) -> Option<Bytes> {
        Some(Bytes::copy_from_slice(input))
    }
}
