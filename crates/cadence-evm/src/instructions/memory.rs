//! Memory access and hashing

use super::{pop, pop_size, push};
use crate::error::EvmResult;
use crate::frame::Frame;
use crate::operation::ExecutionEnv;
use crate::stack::u64_to_word;
use cadence_crypto::keccak256 as hash;

pub fn keccak256(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let offset = pop(frame)?;
    let size = pop_size(frame)?;
    frame.use_gas(env.schedule.keccak_word_cost(size))?;
    let offset = frame.expand_memory(env.schedule, &offset, size)?;
    let digest = hash(&frame.memory().load_slice(offset, size));
    push(frame, *digest.as_bytes())?;
    frame.advance(1);
    Ok(())
}

pub fn mload(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let offset = pop(frame)?;
    let offset = frame.expand_memory(env.schedule, &offset, 32)?;
    let value = frame.memory().load(offset);
    push(frame, value)?;
    frame.advance(1);
    Ok(())
}

pub fn mstore(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let offset = pop(frame)?;
    let value = pop(frame)?;
    let offset = frame.expand_memory(env.schedule, &offset, 32)?;
    frame.memory_mut().store(offset, &value);
    frame.advance(1);
    Ok(())
}

/// Stores the low byte of the value
pub fn mstore8(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let offset = pop(frame)?;
    let value = pop(frame)?;
    let offset = frame.expand_memory(env.schedule, &offset, 1)?;
    frame.memory_mut().store8(offset, value[31]);
    frame.advance(1);
    Ok(())
}

pub fn msize(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    push(frame, u64_to_word(frame.memory().size() as u64))?;
    frame.advance(1);
    Ok(())
}
