//! Per-call execution state

use crate::code::Code;
use crate::context::CallContext;
use crate::error::{EvmResult, HaltReason};
use crate::gas::GasSchedule;
use crate::memory::Memory;
use crate::stack::{word_to_usize, Stack, Word};
use bytes::Bytes;
use cadence_primitives::Gas;
use std::sync::Arc;

/// How a frame finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// STOP, RETURN or running off the end of the code
    Success,
    /// REVERT: state discarded, unused gas returned
    Revert,
    /// Abnormal stop; all gas is consumed
    Halt(HaltReason),
}

impl Outcome {
    /// Whether the frame succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Halt reason, if halted
    pub fn halt_reason(&self) -> Option<HaltReason> {
        match self {
            Outcome::Halt(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Mutable state of one call, owned by the dispatcher while it runs
#[derive(Debug)]
pub struct Frame {
    code: Arc<Code>,
    call: CallContext,
    stack: Stack,
    memory: Memory,
    pc: usize,
    gas_remaining: Gas,
    return_data: Bytes,
    output: Bytes,
    outcome: Option<Outcome>,
}

impl Frame {
    /// Fresh frame running `code` for `call`
    pub fn new(code: Arc<Code>, call: CallContext) -> Self {
        let gas_remaining = call.gas;
        Self {
            code,
            call,
            stack: Stack::new(),
            memory: Memory::new(),
            pc: 0,
            gas_remaining,
            return_data: Bytes::new(),
            output: Bytes::new(),
            outcome: None,
        }
    }

    /// Code being executed
    pub fn code(&self) -> &Arc<Code> {
        &self.code
    }

    /// Message being executed
    pub fn call(&self) -> &CallContext {
        &self.call
    }

    /// Call data
    pub fn input(&self) -> &Bytes {
        &self.call.input
    }

    /// Operand stack
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Operand stack, mutably
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Memory, mutably
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Program counter
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Move the program counter to `pc`
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Advance the program counter by `n` bytes
    pub fn advance(&mut self, n: usize) {
        self.pc = self.pc.saturating_add(n);
    }

    /// Opcode at the program counter
    pub fn current_opcode(&self) -> u8 {
        self.code.opcode_at(self.pc)
    }

    /// Gas left
    pub fn gas_remaining(&self) -> Gas {
        self.gas_remaining
    }

    /// Gas limit the frame started with
    pub fn gas_limit(&self) -> Gas {
        self.call.gas
    }

    /// Deduct `amount`, failing without deducting anything when short
    pub fn use_gas(&mut self, amount: Gas) -> EvmResult<()> {
        if self.gas_remaining < amount {
            return Err(HaltReason::InsufficientGas);
        }
        self.gas_remaining -= amount;
        Ok(())
    }

    /// Return unused gas from a sub-call
    pub fn refund_gas(&mut self, amount: Gas) {
        self.gas_remaining = self.gas_remaining.saturating_add(amount);
    }

    /// Charge for and grow memory to cover `size` bytes at `offset`.
    ///
    /// Returns the native offset; a zero `size` never touches memory and
    /// yields offset 0 regardless of the word.
    pub fn expand_memory(
        &mut self,
        schedule: &GasSchedule,
        offset: &Word,
        size: usize,
    ) -> EvmResult<usize> {
        if size == 0 {
            return Ok(0);
        }
        let offset = word_to_usize(offset).ok_or(HaltReason::OutOfBounds)?;
        let end = offset.checked_add(size).ok_or(HaltReason::OutOfBounds)?;
        let new_words = (end as u64).div_ceil(32);
        let cost = schedule.memory_expansion_cost(self.memory.words(), new_words);
        self.use_gas(cost)?;
        self.memory.grow(offset, size);
        Ok(offset)
    }

    /// Return data of the last sub-call
    pub fn return_data(&self) -> &Bytes {
        &self.return_data
    }

    /// Replace the return data buffer
    pub fn set_return_data(&mut self, data: Bytes) {
        self.return_data = data;
    }

    /// Output of RETURN or REVERT
    pub fn output(&self) -> &Bytes {
        &self.output
    }

    /// Finish normally with `outcome` and `output`
    pub fn finish(&mut self, outcome: Outcome, output: Bytes) {
        self.output = output;
        self.outcome = Some(outcome);
    }

    /// Stop abnormally; no output survives
    pub fn halt(&mut self, reason: HaltReason) {
        self.output = Bytes::new();
        self.outcome = Some(Outcome::Halt(reason));
    }

    /// Whether more steps may run
    pub fn is_running(&self) -> bool {
        self.outcome.is_none()
    }

    /// Terminal outcome, once set
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{u64_to_word, WORD_ZERO};

    fn frame(gas: Gas) -> Frame {
        Frame::new(Arc::new(Code::new(vec![0x00])), CallContext::with_gas(gas))
    }

    #[test]
    fn test_use_gas_is_all_or_nothing() {
        let mut f = frame(10);
        assert!(f.use_gas(4).is_ok());
        assert_eq!(f.gas_remaining(), 6);
        assert_eq!(f.use_gas(7), Err(HaltReason::InsufficientGas));
        assert_eq!(f.gas_remaining(), 6);
        f.refund_gas(4);
        assert_eq!(f.gas_remaining(), 10);
    }

    #[test]
    fn test_expand_memory_charges_delta() {
        let schedule = GasSchedule::default();
        let mut f = frame(1000);
        assert_eq!(f.expand_memory(&schedule, &u64_to_word(0), 32), Ok(0));
        assert_eq!(f.gas_remaining(), 997);
        // Already covered
        f.expand_memory(&schedule, &u64_to_word(16), 16).unwrap();
        assert_eq!(f.gas_remaining(), 997);
        f.expand_memory(&schedule, &u64_to_word(32), 1).unwrap();
        assert_eq!(f.gas_remaining(), 994);
        assert_eq!(f.memory().size(), 64);
    }

    #[test]
    fn test_expand_memory_zero_size_ignores_offset() {
        let schedule = GasSchedule::default();
        let mut f = frame(10);
        assert_eq!(f.expand_memory(&schedule, &[0xff; 32], 0), Ok(0));
        assert_eq!(f.gas_remaining(), 10);
    }

    #[test]
    fn test_expand_memory_out_of_gas_leaves_memory() {
        let schedule = GasSchedule::default();
        let mut f = frame(5);
        assert_eq!(
            f.expand_memory(&schedule, &u64_to_word(1024), 32),
            Err(HaltReason::InsufficientGas)
        );
        assert_eq!(f.memory().size(), 0);
        assert_eq!(
            f.expand_memory(&schedule, &[0xff; 32], 1),
            Err(HaltReason::OutOfBounds)
        );
    }

    #[test]
    fn test_finish_and_halt() {
        let mut f = frame(10);
        assert!(f.is_running());
        f.finish(Outcome::Success, Bytes::from_static(b"ok"));
        assert!(!f.is_running());
        assert_eq!(f.outcome(), Some(Outcome::Success));

        let mut g = frame(10);
        g.stack_mut().push(WORD_ZERO).unwrap();
        g.halt(HaltReason::StackOverflow);
        let reason = g.outcome().and_then(|o| o.halt_reason());
        assert_eq!(reason, Some(HaltReason::StackOverflow));
        assert!(g.output().is_empty());
    }
}
