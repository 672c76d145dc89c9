//! Execution engine: dispatcher loop over the fork's instruction table

use crate::code::{Code, CodeCache};
use crate::config::EngineConfig;
use crate::context::{CallContext, CallHost, EmptyAccounts};
use crate::error::{EngineError, HaltReason};
use crate::fork::Fork;
use crate::frame::{Frame, Outcome};
use crate::gas::GasSchedule;
use crate::operation::{ExecutionEnv, InstructionSet, OperationResult};
use crate::precompile::PrecompileRegistry;
use bytes::Bytes;
use cadence_crypto::bn254::{select_backend, Bn254Backend};
use cadence_primitives::Gas;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of running a frame to completion
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    /// How the frame finished
    pub outcome: Outcome,
    /// Gas consumed
    pub gas_used: Gas,
    /// Gas returned to the caller; zero after a halt
    pub gas_remaining: Gas,
    /// RETURN or REVERT data
    pub output: Bytes,
    /// Program counter when execution stopped
    pub pc: usize,
}

impl ExecutionResult {
    /// Whether the frame succeeded
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Halt reason, if halted
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.outcome.halt_reason()
    }
}

/// Execution engine for one fork.
///
/// Everything here is read-only once built, so one `Evm` can run frames on
/// many threads at once.
pub struct Evm {
    config: EngineConfig,
    schedule: GasSchedule,
    instructions: InstructionSet,
    precompiles: PrecompileRegistry,
    backend: Arc<dyn Bn254Backend>,
    host: Arc<dyn CallHost>,
    code_cache: CodeCache,
}

impl Evm {
    /// Engine whose non-precompile calls see only code-less accounts
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_host(config, Arc::new(EmptyAccounts))
    }

    /// Engine delegating calls to ordinary accounts to `host`
    pub fn with_host(config: EngineConfig, host: Arc<dyn CallHost>) -> Result<Self, EngineError> {
        let backend = select_backend(config.native_bn254)?;
        let schedule = GasSchedule::for_fork(config.fork);
        let instructions = InstructionSet::for_fork(config.fork, &schedule);
        let precompiles = PrecompileRegistry::for_fork(config.fork, Arc::clone(&backend));
        info!(
            fork = %config.fork,
            bn254 = backend.name(),
            opcodes = instructions.len(),
            precompiles = precompiles.len(),
            "Built execution engine"
        );
        Ok(Self {
            code_cache: CodeCache::new(config.code_cache_capacity),
            config,
            schedule,
            instructions,
            precompiles,
            backend,
            host,
        })
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Active fork
    pub fn fork(&self) -> Fork {
        self.config.fork
    }

    /// Active gas schedule
    pub fn schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    /// Active instruction table
    pub fn instructions(&self) -> &InstructionSet {
        &self.instructions
    }

    /// Active precompiles
    pub fn precompiles(&self) -> &PrecompileRegistry {
        &self.precompiles
    }

    /// alt_bn128 backend chosen at start-up
    pub fn bn254_backend(&self) -> &Arc<dyn Bn254Backend> {
        &self.backend
    }

    /// Shared code cache
    pub fn code_cache(&self) -> &CodeCache {
        &self.code_cache
    }

    /// Shared `Code` for `bytes`, analysed at most once across frames
    pub fn load_code(&self, bytes: impl Into<Bytes>) -> Arc<Code> {
        self.code_cache.get_or_insert(bytes)
    }

    fn env(&self) -> ExecutionEnv<'_> {
        ExecutionEnv {
            schedule: &self.schedule,
            precompiles: &self.precompiles,
            host: self.host.as_ref(),
        }
    }

    /// Execute exactly one instruction of `frame`.
    ///
    /// The fixed cost is charged first; when it cannot be paid the frame
    /// halts before the instruction has any effect. A halt from the handler
    /// is recorded on the frame and returned with the cost already charged.
    pub fn step(&self, frame: &mut Frame) -> OperationResult {
        if let Some(outcome) = frame.outcome() {
            return OperationResult {
                gas_cost: None,
                halt: outcome.halt_reason(),
            };
        }

        let opcode = frame.current_opcode();
        let Some(operation) = self.instructions.get(opcode) else {
            return halt(frame, None, HaltReason::InvalidOperation(opcode));
        };

        if let Err(reason) = frame.use_gas(operation.gas) {
            return halt(frame, None, reason);
        }
        if let Err(reason) = frame.stack().require(operation.inputs, operation.outputs) {
            return halt(frame, Some(operation.gas), reason);
        }

        match (operation.execute)(frame, &self.env()) {
            Ok(()) => OperationResult::success(operation.gas),
            Err(reason) => halt(frame, Some(operation.gas), reason),
        }
    }

    /// Step `frame` until it finishes
    pub fn run(&self, frame: &mut Frame) -> ExecutionResult {
        while frame.is_running() {
            self.step(frame);
        }

        let outcome = frame.outcome().unwrap_or(Outcome::Success);
        let gas_remaining = match outcome {
            Outcome::Halt(reason) => {
                debug!(
                    code_hash = %frame.code().hash(),
                    pc = frame.pc(),
                    reason = %reason,
                    "Frame halted"
                );
                0
            }
            _ => frame.gas_remaining(),
        };

        ExecutionResult {
            outcome,
            gas_used: frame.gas_limit() - gas_remaining,
            gas_remaining,
            output: frame.output().clone(),
            pc: frame.pc(),
        }
    }

    /// Run `code` for `call` in a fresh frame
    pub fn execute(&self, code: &Arc<Code>, call: CallContext) -> ExecutionResult {
        let mut frame = Frame::new(Arc::clone(code), call);
        self.run(&mut frame)
    }

    /// Run raw bytecode through the code cache
    pub fn execute_bytes(&self, bytes: impl Into<Bytes>, call: CallContext) -> ExecutionResult {
        let code = self.load_code(bytes);
        self.execute(&code, call)
    }
}

impl std::fmt::Debug for Evm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evm")
            .field("config", &self.config)
            .field("bn254", &self.backend.name())
            .field("cached_code", &self.code_cache.len())
            .finish()
    }
}

fn halt(frame: &mut Frame, gas_cost: Option<Gas>, reason: HaltReason) -> OperationResult {
    frame.halt(reason);
    OperationResult::halted(gas_cost, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::*;
    use crate::stack::{u64_to_word, word_to_u64, WORD_ONE, WORD_ZERO};
    use cadence_crypto::bn254::NativeMode;

    fn evm() -> Evm {
        Evm::new(EngineConfig::default()).unwrap()
    }

    fn run_code(code: &[u8], gas: u64) -> ExecutionResult {
        evm().execute_bytes(code.to_vec(), CallContext::with_gas(gas))
    }

    fn returned_u64(result: &ExecutionResult) -> Option<u64> {
        let word: [u8; 32] = result.output[..].try_into().ok()?;
        word_to_u64(&word)
    }

    /// Code that stores the top of stack at 0 and returns it
    fn return_top() -> Vec<u8> {
        vec![PUSH1, 0x00, MSTORE, PUSH1, 0x20, PUSH1, 0x00, RETURN]
    }

    #[test]
    fn test_stop() {
        let result = run_code(&[STOP], 100);
        assert!(result.is_success());
        assert_eq!(result.gas_used, 0);
    }

    #[test]
    fn test_push_add_return() {
        let mut code = vec![PUSH1, 0x02, PUSH1, 0x03, ADD];
        code.extend(return_top());
        let result = run_code(&code, 1_000);
        assert!(result.is_success());
        assert_eq!(returned_u64(&result), Some(5));
        // 3 + 3 + 3, then MSTORE path 3 + 3 + 3 memory + 3 + 3 + 0
        assert_eq!(result.gas_used, 24);
    }

    #[test]
    fn test_jumpi_step_taken_and_fall_through() {
        let evm = evm();
        let code = evm.load_code(vec![JUMPI, JUMPDEST]);

        let mut frame = Frame::new(Arc::clone(&code), CallContext::with_gas(100));
        frame.stack_mut().push(WORD_ONE).unwrap();
        frame.stack_mut().push(u64_to_word(1)).unwrap();
        let result = evm.step(&mut frame);
        assert_eq!(result, OperationResult::success(10));
        assert_eq!(frame.pc(), 1);
        assert!(code.is_analyzed());

        let fresh = Arc::new(Code::new(vec![JUMPI, JUMPDEST]));
        let mut frame = Frame::new(Arc::clone(&fresh), CallContext::with_gas(100));
        frame.stack_mut().push(WORD_ZERO).unwrap();
        frame.stack_mut().push(u64_to_word(1)).unwrap();
        let result = evm.step(&mut frame);
        assert_eq!(result, OperationResult::success(10));
        assert_eq!(frame.pc(), 1);
        assert!(!fresh.is_analyzed());
        assert_eq!(frame.gas_remaining(), 90);
    }

    #[test]
    fn test_jumpi_invalid_charges_only_base() {
        let evm = evm();
        let code = Arc::new(Code::new(vec![JUMPI, JUMPDEST]));
        let mut frame = Frame::new(code, CallContext::with_gas(100));
        frame.stack_mut().push(WORD_ONE).unwrap();
        frame.stack_mut().push(u64_to_word(2)).unwrap();
        let result = evm.step(&mut frame);
        assert_eq!(
            result,
            OperationResult::halted(Some(10), HaltReason::InvalidJumpDestination)
        );
        assert_eq!(frame.pc(), 0);
        assert_eq!(frame.gas_remaining(), 90);
        assert!(!frame.is_running());
    }

    #[test]
    fn test_out_of_gas_before_effect() {
        let evm = evm();
        let code = Arc::new(Code::new(vec![PUSH1, 0x01]));
        let mut frame = Frame::new(code, CallContext::with_gas(2));
        let result = evm.step(&mut frame);
        assert_eq!(
            result,
            OperationResult::halted(None, HaltReason::InsufficientGas)
        );
        assert!(frame.stack().is_empty());
        assert_eq!(frame.gas_remaining(), 2);
    }

    #[test]
    fn test_halt_consumes_all_gas() {
        let result = run_code(&[PUSH1, 0x09, JUMP], 1_000);
        assert_eq!(
            result.halt_reason(),
            Some(HaltReason::InvalidJumpDestination)
        );
        assert_eq!(result.gas_used, 1_000);
        assert_eq!(result.gas_remaining, 0);
        assert!(result.output.is_empty());
    }

    #[test]
    fn test_undefined_opcode() {
        let result = run_code(&[0x0c], 100);
        assert_eq!(
            result.halt_reason(),
            Some(HaltReason::InvalidOperation(0x0c))
        );
        let result = run_code(&[INVALID], 100);
        assert_eq!(
            result.halt_reason(),
            Some(HaltReason::InvalidOperation(0xfe))
        );
    }

    #[test]
    fn test_fork_gates_opcodes() {
        let byzantium = Evm::new(EngineConfig::for_fork(Fork::Byzantium)).unwrap();
        let result = byzantium.execute_bytes(vec![PUSH0], CallContext::with_gas(100));
        assert_eq!(
            result.halt_reason(),
            Some(HaltReason::InvalidOperation(PUSH0))
        );
        assert!(run_code(&[PUSH0], 100).is_success());
    }

    #[test]
    fn test_stack_underflow_after_charge() {
        let evm = evm();
        let mut frame = Frame::new(Arc::new(Code::new(vec![ADD])), CallContext::with_gas(100));
        let result = evm.step(&mut frame);
        assert_eq!(
            result,
            OperationResult::halted(Some(3), HaltReason::StackUnderflow)
        );
        assert_eq!(frame.gas_remaining(), 97);
    }

    #[test]
    fn test_revert_keeps_gas() {
        // MSTORE 0x2a at 0, REVERT(31, 1)
        let code = [
            PUSH1, 0x2a, PUSH1, 0x00, MSTORE, PUSH1, 0x01, PUSH1, 0x1f, REVERT,
        ];
        let result = run_code(&code, 1_000);
        assert_eq!(result.outcome, Outcome::Revert);
        assert_eq!(&result.output[..], &[0x2a]);
        assert_eq!(result.gas_used, 3 + 3 + 6 + 3 + 3);
        assert_eq!(result.gas_remaining, 1_000 - 18);
    }

    #[test]
    fn test_runs_off_end() {
        let result = run_code(&[PUSH1, 0x01], 100);
        assert!(result.is_success());
        assert_eq!(result.pc, 2);
        assert_eq!(result.gas_used, 3);
    }

    #[test]
    fn test_loop_terminates_by_gas() {
        // JUMPDEST, PUSH1 0, JUMP
        let result = run_code(&[JUMPDEST, PUSH1, 0x00, JUMP], 1_000);
        assert_eq!(result.halt_reason(), Some(HaltReason::InsufficientGas));
    }

    #[test]
    fn test_countdown_loop() {
        // counter = 3; loop: counter -= 1; if counter != 0 goto loop; return counter
        // the loop body starts at offset 2; JUMPI sits at 10
        let mut code = vec![
            PUSH1, 0x03, JUMPDEST, PUSH1, 0x01, SWAP1, SUB, DUP1, PUSH1, 0x02, JUMPI,
        ];
        code.extend(return_top());
        let result = run_code(&code, 10_000);
        assert!(result.is_success());
        assert_eq!(returned_u64(&result), Some(0));
    }

    #[test]
    fn test_step_after_finish_is_inert() {
        let evm = evm();
        let mut frame = Frame::new(Arc::new(Code::new(vec![STOP])), CallContext::with_gas(10));
        assert_eq!(evm.step(&mut frame), OperationResult::success(0));
        assert_eq!(
            evm.step(&mut frame),
            OperationResult {
                gas_cost: None,
                halt: None
            }
        );
        assert_eq!(frame.gas_remaining(), 10);
    }

    #[test]
    fn test_code_cache_shared_across_executions() {
        let evm = evm();
        let program = vec![PUSH1, 0x03, JUMP, JUMPDEST];
        evm.execute_bytes(program.clone(), CallContext::with_gas(100));
        let code = evm.load_code(program);
        assert!(code.is_analyzed());
        assert_eq!(evm.code_cache().len(), 1);
    }

    #[test]
    fn test_portable_engine() {
        let config = EngineConfig {
            native_bn254: NativeMode::Disabled,
            ..EngineConfig::default()
        };
        let evm = Evm::new(config).unwrap();
        assert_eq!(evm.bn254_backend().name(), "portable");
        assert_eq!(evm.precompiles().len(), 3);
        assert_eq!(evm.fork(), Fork::Shanghai);
    }

    #[cfg(not(feature = "native-bn254"))]
    #[test]
    fn test_native_required_but_missing() {
        let config = EngineConfig {
            native_bn254: NativeMode::Enabled,
            ..EngineConfig::default()
        };
        assert!(matches!(Evm::new(config), Err(EngineError::Crypto(_))));
    }
}
