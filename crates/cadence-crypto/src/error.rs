//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The requested arithmetic backend was not compiled into this build
    #[error("backend unavailable: {0}")]
    BackendUnavailable(&'static str),

    /// Unrecognised acceleration mode
    #[error("invalid native mode: {0}")]
    InvalidNativeMode(String),
}
