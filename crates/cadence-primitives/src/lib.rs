//! # cadence-primitives
//!
//! Fixed-width value types shared by the cadence crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::Address;
pub use hash::H256;

// Re-export primitive-types for wide integer arithmetic
pub use primitive_types::{U256, U512};

/// Block height type
pub type BlockHeight = u64;

/// Gas type
pub type Gas = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_full_mul_fits_u512() {
        let a = U256::MAX;
        let wide: U512 = a.full_mul(a);
        assert!(wide > U512::from(a));
    }
}
