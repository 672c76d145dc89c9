//! Error types for fixture runs

use cadence_evm::EngineError;
use thiserror::Error;

/// Fixture run error
#[derive(Error, Debug)]
pub enum TestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture field could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// Engine could not be built for the fixture
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Observed behaviour differs from the fixture
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Fixture names something the engine does not implement
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Test result type
pub type TestResult<T> = Result<T, TestError>;
