//! POP, PUSH0..PUSH32, DUPn, SWAPn

use super::{pop as pop_word, push as push_word};
use crate::error::EvmResult;
use crate::frame::Frame;
use crate::opcode;
use crate::operation::ExecutionEnv;
use crate::stack::WORD_ZERO;

pub fn pop(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    pop_word(frame)?;
    frame.advance(1);
    Ok(())
}

pub fn push0(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    push_word(frame, WORD_ZERO)?;
    frame.advance(1);
    Ok(())
}

/// PUSHn: operand bytes past the end of the code read as zero
pub fn push(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let size = opcode::push_size(frame.current_opcode());
    let start = frame.pc() + 1;
    let code = frame.code().bytes();
    let available = code.len().saturating_sub(start).min(size);

    // Right-align the operand; missing trailing bytes stay zero
    let mut word = WORD_ZERO;
    let begin = 32 - size;
    word[begin..begin + available].copy_from_slice(&code[start..start + available]);

    push_word(frame, word)?;
    frame.advance(1 + size);
    Ok(())
}

pub fn dup(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let depth = opcode::dup_depth(frame.current_opcode());
    frame.stack_mut().dup(depth)?;
    frame.advance(1);
    Ok(())
}

pub fn swap(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let depth = opcode::swap_depth(frame.current_opcode());
    frame.stack_mut().swap(depth)?;
    frame.advance(1);
    Ok(())
}
