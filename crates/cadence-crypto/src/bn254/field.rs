//! Base field Fq of alt_bn128

use primitive_types::{U256, U512};
use std::ops::{Add, Mul, Neg, Sub};

/// Field modulus p
/// (0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47)
pub const FIELD_MODULUS: U256 = U256([
    0x3c20_8c16_d87c_fd47,
    0x9781_6a91_6871_ca8d,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
]);

/// Order r of the G1 group
/// (0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001)
pub const GROUP_ORDER: U256 = U256([
    0x43e1_f593_f000_0001,
    0x2833_e848_79b9_7091,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
]);

/// Element of Fq, always held reduced below [`FIELD_MODULUS`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fq(U256);

impl Fq {
    /// Additive identity
    pub const ZERO: Fq = Fq(U256([0, 0, 0, 0]));

    /// Multiplicative identity
    pub const ONE: Fq = Fq(U256([1, 0, 0, 0]));

    /// Field element from a canonical integer; `None` when `value >= p`
    pub fn new(value: U256) -> Option<Self> {
        if value < FIELD_MODULUS {
            Some(Fq(value))
        } else {
            None
        }
    }

    /// Small constant
    pub fn from_u64(value: u64) -> Self {
        Fq(U256::from(value))
    }

    /// Parse a 32-byte big-endian integer; `None` when it is not below p
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::new(U256::from_big_endian(bytes))
    }

    /// Canonical 32-byte big-endian encoding
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Canonical integer value
    pub fn value(&self) -> U256 {
        self.0
    }

    /// Whether this is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// self * self
    pub fn square(self) -> Self {
        self * self
    }

    /// self + self
    pub fn double(self) -> Self {
        self + self
    }

    /// Exponentiation by square-and-multiply
    pub fn pow(self, exponent: U256) -> Self {
        let mut acc = Fq::ONE;
        for i in (0..exponent.bits()).rev() {
            acc = acc.square();
            if exponent.bit(i) {
                acc = acc * self;
            }
        }
        acc
    }

    /// Multiplicative inverse via Fermat's little theorem; `None` for zero
    pub fn inverse(self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.pow(FIELD_MODULUS - U256::from(2u8)))
    }
}

impl Add for Fq {
    type Output = Fq;

    fn add(self, rhs: Fq) -> Fq {
        // p < 2^254, so the sum of two reduced elements cannot overflow 256 bits
        let sum = self.0 + rhs.0;
        if sum >= FIELD_MODULUS {
            Fq(sum - FIELD_MODULUS)
        } else {
            Fq(sum)
        }
    }
}

impl Sub for Fq {
    type Output = Fq;

    fn sub(self, rhs: Fq) -> Fq {
        if self.0 >= rhs.0 {
            Fq(self.0 - rhs.0)
        } else {
            Fq(FIELD_MODULUS - (rhs.0 - self.0))
        }
    }
}

impl Neg for Fq {
    type Output = Fq;

    fn neg(self) -> Fq {
        if self.is_zero() {
            self
        } else {
            Fq(FIELD_MODULUS - self.0)
        }
    }
}

impl Mul for Fq {
    type Output = Fq;

    fn mul(self, rhs: Fq) -> Fq {
        Fq(reduce(self.0.full_mul(rhs.0)))
    }
}

/// Reduce a 512-bit product modulo p
fn reduce(wide: U512) -> U256 {
    let rem = wide % U512::from(FIELD_MODULUS);
    let mut buf = [0u8; 64];
    rem.to_big_endian(&mut buf);
    U256::from_big_endian(&buf[32..])
}
