//! Control flow and frame termination

use super::{pop, pop_size, push};
use crate::error::{EvmResult, HaltReason};
use crate::frame::{Frame, Outcome};
use crate::operation::ExecutionEnv;
use crate::stack::{u64_to_word, word_is_zero, word_to_usize, Word};
use bytes::Bytes;

pub fn stop(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    frame.finish(Outcome::Success, Bytes::new());
    Ok(())
}

pub fn jump(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let destination = pop(frame)?;
    let target = jump_target(frame, &destination)?;
    frame.set_pc(target);
    Ok(())
}

/// Native offset of `destination` if it is a JUMPDEST on an instruction
/// boundary
fn jump_target(frame: &Frame, destination: &Word) -> EvmResult<usize> {
    word_to_usize(destination)
        .filter(|&offset| frame.code().is_valid_jump_destination(offset))
        .ok_or(HaltReason::InvalidJumpDestination)
}

/// Conditional jump. Pops the destination, then the condition. A zero
/// condition falls through without looking at the destination, so code that
/// never takes a branch is never analysed.
pub fn jumpi(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let destination = pop(frame)?;
    let condition = pop(frame)?;

    if word_is_zero(&condition) {
        frame.advance(1);
        return Ok(());
    }

    let target = jump_target(frame, &destination)?;
    frame.set_pc(target);
    Ok(())
}

pub fn jumpdest(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    frame.advance(1);
    Ok(())
}

pub fn pc(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    push(frame, u64_to_word(frame.pc() as u64))?;
    frame.advance(1);
    Ok(())
}

/// Gas left after paying for this instruction
pub fn gas(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    push(frame, u64_to_word(frame.gas_remaining()))?;
    frame.advance(1);
    Ok(())
}

fn output_region(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<Bytes> {
    let offset = pop(frame)?;
    let size = pop_size(frame)?;
    let offset = frame.expand_memory(env.schedule, &offset, size)?;
    Ok(Bytes::from(frame.memory().load_slice(offset, size)))
}

/// RETURN
pub fn ret(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let data = output_region(frame, env)?;
    frame.finish(Outcome::Success, data);
    Ok(())
}

pub fn revert(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let data = output_region(frame, env)?;
    frame.finish(Outcome::Revert, data);
    Ok(())
}

/// Designated invalid instruction (0xFE)
pub fn invalid(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    Err(HaltReason::InvalidOperation(frame.current_opcode()))
}
