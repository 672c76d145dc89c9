//! # cadence-evm
//!
//! Bytecode execution engine for cadence.
//!
//! This crate provides:
//! - Jump-destination analysis shared through a code cache
//! - A per-fork instruction table and single-step dispatcher
//! - Precompiled contracts, including alt_bn128 with a native fast path
//! - Gas metering and halt reporting

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod config;
pub mod context;
pub mod error;
pub mod fork;
pub mod frame;
pub mod gas;
mod instructions;
pub mod interpreter;
pub mod memory;
pub mod opcode;
pub mod operation;
pub mod precompile;
pub mod protocol;
pub mod stack;

pub use code::{Code, CodeCache, JumpDestinations};
pub use config::EngineConfig;
pub use context::{CallContext, CallHost, CallOutcome, EmptyAccounts};
pub use error::{EngineError, EvmResult, HaltReason};
pub use fork::Fork;
pub use frame::{Frame, Outcome};
pub use gas::GasSchedule;
pub use interpreter::{Evm, ExecutionResult};
pub use operation::{InstructionSet, Operation, OperationResult};
pub use precompile::{PrecompileOutcome, PrecompileRegistry, PrecompiledContract};
pub use protocol::{ConsensusContext, GenesisAccount, GenesisState, ProtocolContext};
