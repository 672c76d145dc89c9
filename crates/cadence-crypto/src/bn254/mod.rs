//! alt_bn128 (BN254) G1 arithmetic
//!
//! Inputs use the precompile wire layout: 32-byte big-endian words, short
//! input zero-padded on the right. Outputs are 64 bytes, `x || y`.

mod backend;
pub mod field;
#[cfg(feature = "native-bn254")]
mod native;
pub mod point;

pub use backend::{select_backend, Bn254Backend, NativeMode, PortableBn254};
pub use field::{Fq, FIELD_MODULUS, GROUP_ORDER};
#[cfg(feature = "native-bn254")]
pub use native::NativeBn254;
pub use point::G1Point;

use primitive_types::{U256, U512};

/// Size of one encoded field element or scalar
pub const WORD_LEN: usize = 32;

/// Size of an encoded G1 point
pub const POINT_LEN: usize = 64;

/// Big-endian unsigned integer of `length` bytes starting at `offset`.
///
/// Bytes beyond the end of `input` read as zero. An `offset` past the end or a
/// zero `length` yields zero. `length` is capped at 64 bytes.
pub fn extract_parameter(input: &[u8], offset: usize, length: usize) -> U512 {
    if offset > input.len() || length == 0 {
        return U512::zero();
    }
    let length = length.min(64);
    let end = offset.saturating_add(length).min(input.len());
    let available = &input[offset..end];

    let mut raw = [0u8; 64];
    let start = 64 - length;
    raw[start..start + available.len()].copy_from_slice(available);
    U512::from_big_endian(&raw)
}

/// 32-byte word at `offset`, zero-padded on the right
pub fn padded_word(input: &[u8], offset: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    if offset < input.len() {
        let end = offset.saturating_add(WORD_LEN).min(input.len());
        word[..end - offset].copy_from_slice(&input[offset..end]);
    }
    word
}

/// Narrow to 256 bits; `None` when the value does not fit
fn narrow(value: U512) -> Option<U256> {
    if value.bits() > 256 {
        return None;
    }
    let mut buf = [0u8; 64];
    value.to_big_endian(&mut buf);
    Some(U256::from_big_endian(&buf[32..]))
}

/// Field element at `offset`; `None` when not below the field modulus
fn parse_coordinate(input: &[u8], offset: usize) -> Option<Fq> {
    Fq::new(narrow(extract_parameter(input, offset, WORD_LEN))?)
}

/// On-curve point encoded at `offset`
pub(crate) fn parse_point(input: &[u8], offset: usize) -> Option<G1Point> {
    let x = parse_coordinate(input, offset)?;
    let y = parse_coordinate(input, offset + WORD_LEN)?;
    let point = G1Point::new(x, y);
    point.is_on_curve().then_some(point)
}

/// Scalar encoded at `offset`.
///
/// The upper bound can only trip if the parameter width is widened past 256
/// bits.
pub(crate) fn parse_scalar(input: &[u8], offset: usize) -> Option<U256> {
    let n = extract_parameter(input, offset, WORD_LEN);
    if n > U512::from(U256::MAX) {
        return None;
    }
    narrow(n)
}
