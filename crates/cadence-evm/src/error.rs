//! Halt reasons and engine errors

use cadence_crypto::CryptoError;
use thiserror::Error;

/// Why a frame stopped abnormally.
///
/// A halt is terminal for the frame. Precompile rejections are not halts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// Not enough gas left for the next charge
    #[error("insufficient gas")]
    InsufficientGas,

    /// Jump target is not a JUMPDEST on an instruction boundary
    #[error("invalid jump destination")]
    InvalidJumpDestination,

    /// Too few stack items for the instruction
    #[error("stack underflow")]
    StackUnderflow,

    /// Stack would exceed 1024 items
    #[error("stack overflow (max 1024)")]
    StackOverflow,

    /// Opcode undefined in the active instruction set, or INVALID
    #[error("invalid operation: 0x{0:02x}")]
    InvalidOperation(u8),

    /// Memory offset or size not representable on this platform
    #[error("memory access out of bounds")]
    OutOfBounds,

    /// RETURNDATACOPY past the end of the return buffer
    #[error("return data access out of bounds")]
    InvalidReturnDataAccess,
}

/// Result type for instruction handlers
pub type EvmResult<T> = Result<T, HaltReason>;

/// Failure while building an engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unrecognised fork name
    #[error("unknown fork: {0}")]
    UnknownFork(String),

    /// Malformed configuration document
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend selection failed
    #[error("crypto backend: {0}")]
    Crypto(#[from] CryptoError),

    /// Chain or world-state collaborator failure
    #[error("state error: {0}")]
    State(String),
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::Config(e.to_string())
    }
}
