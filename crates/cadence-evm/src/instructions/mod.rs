//! Instruction handlers, grouped by family

pub mod arithmetic;
pub mod bitwise;
pub mod control;
pub mod environment;
pub mod memory;
pub mod stack;
pub mod system;

use crate::error::{EvmResult, HaltReason};
use crate::frame::Frame;
use crate::stack::{word_to_usize, Word};

/// Pop a byte count. Counts that do not fit a native integer could never be
/// paid for.
pub(crate) fn pop_size(frame: &mut Frame) -> EvmResult<usize> {
    let word = frame.stack_mut().pop()?;
    word_to_usize(&word).ok_or(HaltReason::InsufficientGas)
}

/// Pop a word
pub(crate) fn pop(frame: &mut Frame) -> EvmResult<Word> {
    frame.stack_mut().pop()
}

/// Push a word
pub(crate) fn push(frame: &mut Frame, value: Word) -> EvmResult<()> {
    frame.stack_mut().push(value)
}

/// Pop two operands, push `f(a, b)`, advance
pub(crate) fn binary(frame: &mut Frame, f: impl FnOnce(&Word, &Word) -> Word) -> EvmResult<()> {
    let a = pop(frame)?;
    let b = pop(frame)?;
    push(frame, f(&a, &b))?;
    frame.advance(1);
    Ok(())
}

/// Pop one operand, push `f(a)`, advance
pub(crate) fn unary(frame: &mut Frame, f: impl FnOnce(&Word) -> Word) -> EvmResult<()> {
    let a = pop(frame)?;
    push(frame, f(&a))?;
    frame.advance(1);
    Ok(())
}
