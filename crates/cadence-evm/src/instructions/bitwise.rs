//! Bitwise logic and shifts

use super::{binary, unary};
use crate::error::EvmResult;
use crate::frame::Frame;
use crate::operation::ExecutionEnv;
use crate::stack::{from_u256, to_u256, word_to_u64, Word, WORD_ZERO};
use primitive_types::U256;

fn zip(a: &Word, b: &Word, f: impl Fn(u8, u8) -> u8) -> Word {
    let mut out = WORD_ZERO;
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = f(a[i], b[i]);
    }
    out
}

pub fn and(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| zip(a, b, |x, y| x & y))
}

pub fn or(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| zip(a, b, |x, y| x | y))
}

pub fn xor(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| zip(a, b, |x, y| x ^ y))
}

pub fn not(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    unary(frame, |a| a.map(|byte| !byte))
}

/// Shift amount, `None` when it clears the whole word
fn shift_amount(shift: &Word) -> Option<usize> {
    word_to_u64(shift).filter(|&s| s < 256).map(|s| s as usize)
}

/// SHL: shift on top, value below
pub fn shl(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |shift, value| match shift_amount(shift) {
        Some(s) => from_u256(to_u256(value) << s),
        None => WORD_ZERO,
    })
}

pub fn shr(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |shift, value| match shift_amount(shift) {
        Some(s) => from_u256(to_u256(value) >> s),
        None => WORD_ZERO,
    })
}

/// Arithmetic shift: vacated high bits take the sign bit
pub fn sar(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |shift, value| {
        let negative = value[0] & 0x80 != 0;
        match shift_amount(shift) {
            Some(0) => *value,
            Some(s) => {
                let shifted = to_u256(value) >> s;
                if negative {
                    from_u256(shifted | (U256::MAX << (256 - s)))
                } else {
                    from_u256(shifted)
                }
            }
            None if negative => [0xff; 32],
            None => WORD_ZERO,
        }
    })
}
