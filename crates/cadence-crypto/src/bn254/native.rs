//! Native backend on the `substrate-bn` crate

use super::backend::Bn254Backend;
use super::{padded_word, POINT_LEN, WORD_LEN};
use bn::{AffineG1, Fq, Fr, Group, G1};

/// Backend delegating to `substrate-bn`
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBn254;

impl Bn254Backend for NativeBn254 {
    fn name(&self) -> &'static str {
        "native"
    }

    fn g1_add(&self, input: &[u8]) -> Option<[u8; POINT_LEN]> {
        let a = read_point(input, 0)?;
        let b = read_point(input, 64)?;
        encode(a + b)
    }

    fn g1_mul(&self, input: &[u8]) -> Option<[u8; POINT_LEN]> {
        let point = read_point(input, 0)?;
        // Reduced mod r, which leaves the product unchanged
        let scalar = Fr::from_slice(&padded_word(input, 64)).ok()?;
        encode(point * scalar)
    }
}

fn read_point(input: &[u8], offset: usize) -> Option<G1> {
    let x = Fq::from_slice(&padded_word(input, offset)).ok()?;
    let y = Fq::from_slice(&padded_word(input, offset + WORD_LEN)).ok()?;
    if x == Fq::zero() && y == Fq::zero() {
        return Some(G1::zero());
    }
    AffineG1::new(x, y).ok().map(G1::from)
}

fn encode(point: G1) -> Option<[u8; POINT_LEN]> {
    let mut out = [0u8; POINT_LEN];
    if let Some(affine) = AffineG1::from_jacobian(point) {
        affine.x().to_big_endian(&mut out[..WORD_LEN]).ok()?;
        affine.y().to_big_endian(&mut out[WORD_LEN..]).ok()?;
    }
    Some(out)
}
