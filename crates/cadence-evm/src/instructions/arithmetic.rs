//! Arithmetic and comparison: wrapping 256-bit unsigned math

use super::{binary, unary};
use crate::error::EvmResult;
use crate::frame::Frame;
use crate::operation::ExecutionEnv;
use crate::stack::{bool_to_word, from_u256, to_u256, word_is_zero, WORD_ZERO};

pub fn add(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| {
        from_u256(to_u256(a).overflowing_add(to_u256(b)).0)
    })
}

pub fn mul(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| {
        from_u256(to_u256(a).overflowing_mul(to_u256(b)).0)
    })
}

pub fn sub(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| {
        from_u256(to_u256(a).overflowing_sub(to_u256(b)).0)
    })
}

/// Division by zero yields zero
pub fn div(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| {
        let divisor = to_u256(b);
        if divisor.is_zero() {
            WORD_ZERO
        } else {
            from_u256(to_u256(a) / divisor)
        }
    })
}

/// MOD; modulo zero yields zero
pub fn rem(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| {
        let divisor = to_u256(b);
        if divisor.is_zero() {
            WORD_ZERO
        } else {
            from_u256(to_u256(a) % divisor)
        }
    })
}

// Big-endian byte order makes lexicographic comparison numeric
pub fn lt(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| bool_to_word(a < b))
}

pub fn gt(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| bool_to_word(a > b))
}

pub fn eq(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    binary(frame, |a, b| bool_to_word(a == b))
}

pub fn iszero(frame: &mut Frame, _env: &ExecutionEnv<'_>) -> EvmResult<()> {
    unary(frame, |a| bool_to_word(word_is_zero(a)))
}
