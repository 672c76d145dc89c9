//! Call data, code and return data access

use super::{pop, pop_size, push};
use crate::error::{EvmResult, HaltReason};
use crate::frame::Frame;
use crate::operation::ExecutionEnv;
use crate::stack::{u64_to_word, word_to_usize, WORD_ZERO};

/// Offsets past the end of the call data read zeros
pub fn calldataload(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let offset = pop(frame)?;
    let mut word = WORD_ZERO;
    if let Some(offset) = word_to_usize(&offset) {
        let input = frame.input();
        if offset < input.len() {
            let available = (input.len() - offset).min(32);
            word[..available].copy_from_slice(&input[offset..offset + available]);
        }
    }
    push(frame, word)?;
    frame.advance(1);
    Ok(())
}

pub fn calldatasize(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    push(frame, u64_to_word(frame.input().len() as u64))?;
    frame.advance(1);
    Ok(())
}

pub fn calldatacopy(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let dest = pop(frame)?;
    let source = pop(frame)?;
    let size = pop_size(frame)?;

    frame.use_gas(env.schedule.copy_cost(size))?;
    let dest = frame.expand_memory(env.schedule, &dest, size)?;
    let source = word_to_usize(&source).unwrap_or(usize::MAX);
    let input = frame.input().clone();
    frame.memory_mut().store_padded(dest, &input, source, size);
    frame.advance(1);
    Ok(())
}

pub fn codesize(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    push(frame, u64_to_word(frame.code().len() as u64))?;
    frame.advance(1);
    Ok(())
}

pub fn returndatasize(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    push(frame, u64_to_word(frame.return_data().len() as u64))?;
    frame.advance(1);
    Ok(())
}

/// Unlike call data, reading past the end of the return data halts
pub fn returndatacopy(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let dest = pop(frame)?;
    let source = pop(frame)?;
    let size = pop_size(frame)?;

    let source = word_to_usize(&source).ok_or(HaltReason::InvalidReturnDataAccess)?;
    let end = source
        .checked_add(size)
        .filter(|&end| end <= frame.return_data().len())
        .ok_or(HaltReason::InvalidReturnDataAccess)?;

    frame.use_gas(env.schedule.copy_cost(size))?;
    let dest = frame.expand_memory(env.schedule, &dest, size)?;
    let data = frame.return_data().slice(source..end);
    frame.memory_mut().store_slice(dest, &data);
    frame.advance(1);
    Ok(())
}
