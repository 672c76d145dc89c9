//! Call context and the host boundary for non-precompile calls

use bytes::Bytes;
use cadence_primitives::{Address, Gas};

/// Message being executed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallContext {
    /// Account whose code runs
    pub address: Address,
    /// Sender of the message
    pub caller: Address,
    /// Call data
    pub input: Bytes,
    /// Gas limit for the frame
    pub gas: Gas,
}

impl CallContext {
    /// Call of `address` with `gas`
    pub fn new(address: Address, caller: Address, input: impl Into<Bytes>, gas: Gas) -> Self {
        Self {
            address,
            caller,
            input: input.into(),
            gas,
        }
    }

    /// Context with only a gas limit set
    pub fn with_gas(gas: Gas) -> Self {
        Self {
            gas,
            ..Default::default()
        }
    }

    /// Replace the call data
    pub fn input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = input.into();
        self
    }
}

/// Result of a call handled by the host
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallOutcome {
    /// Whether the callee succeeded
    pub success: bool,
    /// Return data
    pub output: Bytes,
    /// Gas consumed out of the forwarded amount
    pub gas_used: Gas,
}

/// Chain/world-state collaborator that runs calls to ordinary accounts
pub trait CallHost: Send + Sync {
    /// Read-only call of `target` carrying `call.input` and at most `call.gas`
    fn static_call(&self, target: Address, call: &CallContext) -> CallOutcome;
}

/// Host in which every account is code-less: calls succeed immediately,
/// return nothing and use no gas
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyAccounts;

impl CallHost for EmptyAccounts {
    fn static_call(&self, _target: Address, _call: &CallContext) -> CallOutcome {
        CallOutcome {
            success: true,
            output: Bytes::new(),
            gas_used: 0,
        }
    }
}
