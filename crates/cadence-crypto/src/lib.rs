//! # cadence-crypto
//!
//! Cryptographic primitives for the cadence execution engine.
//!
//! - Keccak-256 hashing (code identity)
//! - alt_bn128 (BN254) G1 arithmetic with a portable implementation and an
//!   optional native backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bn254;
mod error;
mod hash;

pub use error::CryptoError;
pub use hash::keccak256;
