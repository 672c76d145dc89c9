//! Instruction table and the uniform step result

use crate::context::CallHost;
use crate::error::{EvmResult, HaltReason};
use crate::fork::Fork;
use crate::frame::Frame;
use crate::gas::GasSchedule;
use crate::instructions::{arithmetic, bitwise, control, environment, memory, stack, system};
use crate::opcode::*;
use crate::precompile::PrecompileRegistry;
use cadence_primitives::Gas;
use std::fmt;

/// Shared, read-only collaborators available to every handler
pub struct ExecutionEnv<'a> {
    /// Active gas schedule
    pub schedule: &'a GasSchedule,
    /// Active precompiles
    pub precompiles: &'a PrecompileRegistry,
    /// Host for calls to ordinary accounts
    pub host: &'a dyn CallHost,
}

/// Instruction handler. Runs after the fixed cost is charged and the stack
/// bounds are checked; it must leave the program counter on the next
/// instruction or finish the frame.
pub type ExecuteFn = fn(&mut Frame, &ExecutionEnv<'_>) -> EvmResult<()>;

/// One instruction-table entry
#[derive(Clone, Copy)]
pub struct Operation {
    /// Opcode byte
    pub opcode: u8,
    /// Mnemonic
    pub name: &'static str,
    /// Words popped
    pub inputs: usize,
    /// Words pushed
    pub outputs: usize,
    /// Fixed cost charged before the handler runs
    pub gas: Gas,
    /// Handler
    pub execute: ExecuteFn,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("opcode", &format_args!("0x{:02x}", self.opcode))
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("gas", &self.gas)
            .finish()
    }
}

/// Result of one dispatcher step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationResult {
    /// Fixed cost charged for the step, if it was charged
    pub gas_cost: Option<Gas>,
    /// Set when the step halted the frame
    pub halt: Option<HaltReason>,
}

impl OperationResult {
    /// Step completed
    pub fn success(gas_cost: Gas) -> Self {
        Self {
            gas_cost: Some(gas_cost),
            halt: None,
        }
    }

    /// Step halted
    pub fn halted(gas_cost: Option<Gas>, reason: HaltReason) -> Self {
        Self {
            gas_cost,
            halt: Some(reason),
        }
    }

    /// Whether the step halted
    pub fn is_halt(&self) -> bool {
        self.halt.is_some()
    }
}

/// 256-entry table from opcode byte to operation, fixed per fork
#[derive(Debug)]
pub struct InstructionSet {
    fork: Fork,
    table: [Option<Operation>; 256],
}

impl InstructionSet {
    /// Table for `fork`, with fixed costs drawn from `schedule`
    pub fn for_fork(fork: Fork, schedule: &GasSchedule) -> Self {
        let mut set = Self {
            fork,
            table: [None; 256],
        };
        let s = schedule;

        set.add(STOP, "STOP", 0, 0, s.zero, control::stop);
        set.add(ADD, "ADD", 2, 1, s.very_low, arithmetic::add);
        set.add(MUL, "MUL", 2, 1, s.low, arithmetic::mul);
        set.add(SUB, "SUB", 2, 1, s.very_low, arithmetic::sub);
        set.add(DIV, "DIV", 2, 1, s.low, arithmetic::div);
        set.add(MOD, "MOD", 2, 1, s.low, arithmetic::rem);
        set.add(LT, "LT", 2, 1, s.very_low, arithmetic::lt);
        set.add(GT, "GT", 2, 1, s.very_low, arithmetic::gt);
        set.add(EQ, "EQ", 2, 1, s.very_low, arithmetic::eq);
        set.add(ISZERO, "ISZERO", 1, 1, s.very_low, arithmetic::iszero);
        set.add(AND, "AND", 2, 1, s.very_low, bitwise::and);
        set.add(OR, "OR", 2, 1, s.very_low, bitwise::or);
        set.add(XOR, "XOR", 2, 1, s.very_low, bitwise::xor);
        set.add(NOT, "NOT", 1, 1, s.very_low, bitwise::not);
        if fork.is_enabled(Fork::Constantinople) {
            set.add(SHL, "SHL", 2, 1, s.very_low, bitwise::shl);
            set.add(SHR, "SHR", 2, 1, s.very_low, bitwise::shr);
            set.add(SAR, "SAR", 2, 1, s.very_low, bitwise::sar);
        }
        set.add(KECCAK256, "KECCAK256", 2, 1, s.keccak, memory::keccak256);

        set.add(
            CALLDATALOAD,
            "CALLDATALOAD",
            1,
            1,
            s.very_low,
            environment::calldataload,
        );
        set.add(
            CALLDATASIZE,
            "CALLDATASIZE",
            0,
            1,
            s.base,
            environment::calldatasize,
        );
        set.add(
            CALLDATACOPY,
            "CALLDATACOPY",
            3,
            0,
            s.very_low,
            environment::calldatacopy,
        );
        set.add(CODESIZE, "CODESIZE", 0, 1, s.base, environment::codesize);
        set.add(
            RETURNDATASIZE,
            "RETURNDATASIZE",
            0,
            1,
            s.base,
            environment::returndatasize,
        );
        set.add(
            RETURNDATACOPY,
            "RETURNDATACOPY",
            3,
            0,
            s.very_low,
            environment::returndatacopy,
        );

        set.add(POP, "POP", 1, 0, s.base, stack::pop);
        set.add(MLOAD, "MLOAD", 1, 1, s.very_low, memory::mload);
        set.add(MSTORE, "MSTORE", 2, 0, s.very_low, memory::mstore);
        set.add(MSTORE8, "MSTORE8", 2, 0, s.very_low, memory::mstore8);
        set.add(JUMP, "JUMP", 1, 0, s.mid, control::jump);
        set.add(JUMPI, "JUMPI", 2, 0, s.high, control::jumpi);
        set.add(PC, "PC", 0, 1, s.base, control::pc);
        set.add(MSIZE, "MSIZE", 0, 1, s.base, memory::msize);
        set.add(GAS, "GAS", 0, 1, s.base, control::gas);
        set.add(JUMPDEST, "JUMPDEST", 0, 0, s.jumpdest, control::jumpdest);
        if fork.is_enabled(Fork::Shanghai) {
            set.add(PUSH0, "PUSH0", 0, 1, s.base, stack::push0);
        }
        for op in PUSH1..=PUSH32 {
            let name = PUSH_NAMES[(op - PUSH1) as usize];
            set.add(op, name, 0, 1, s.very_low, stack::push);
        }
        for op in DUP1..=DUP16 {
            let depth = dup_depth(op);
            let name = DUP_NAMES[depth - 1];
            set.add(op, name, depth, depth + 1, s.very_low, stack::dup);
        }
        for op in SWAP1..=SWAP16 {
            let depth = swap_depth(op);
            let name = SWAP_NAMES[depth - 1];
            set.add(op, name, depth + 1, depth + 1, s.very_low, stack::swap);
        }

        set.add(RETURN, "RETURN", 2, 0, s.zero, control::ret);
        set.add(
            STATICCALL,
            "STATICCALL",
            6,
            1,
            s.warm_call,
            system::staticcall,
        );
        set.add(REVERT, "REVERT", 2, 0, s.zero, control::revert);
        set.add(INVALID, "INVALID", 0, 0, s.zero, control::invalid);
        set
    }

    fn add(
        &mut self,
        opcode: u8,
        name: &'static str,
        inputs: usize,
        outputs: usize,
        gas: Gas,
        execute: ExecuteFn,
    ) {
        self.table[opcode as usize] = Some(Operation {
            opcode,
            name,
            inputs,
            outputs,
            gas,
            execute,
        });
    }

    /// Operation for `opcode`, if defined at this fork
    pub fn get(&self, opcode: u8) -> Option<&Operation> {
        self.table[opcode as usize].as_ref()
    }

    /// Fork the table was built for
    pub fn fork(&self) -> Fork {
        self.fork
    }

    /// Number of defined opcodes
    pub fn len(&self) -> usize {
        self.table.iter().filter(|op| op.is_some()).count()
    }

    /// Whether no opcode is defined
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const PUSH_NAMES: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9", "PUSH10",
    "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18", "PUSH19",
    "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27", "PUSH28",
    "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_NAMES: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8", "DUP9", "DUP10", "DUP11",
    "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_NAMES: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8", "SWAP9", "SWAP10",
    "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn table(fork: Fork) -> InstructionSet {
        InstructionSet::for_fork(fork, &GasSchedule::for_fork(fork))
    }

    #[test]
    fn test_jumpi_is_high_tier() {
        let set = table(Fork::Shanghai);
        let jumpi = set.get(JUMPI).unwrap();
        assert_eq!(jumpi.name, "JUMPI");
        assert_eq!(jumpi.gas, 10);
        assert_eq!((jumpi.inputs, jumpi.outputs), (2, 0));
        assert_eq!(set.get(JUMP).unwrap().gas, 8);
    }

    #[test]
    fn test_fork_gating() {
        assert!(table(Fork::Byzantium).get(SHL).is_none());
        assert!(table(Fork::Constantinople).get(SHL).is_some());
        assert!(table(Fork::London).get(PUSH0).is_none());
        assert!(table(Fork::Shanghai).get(PUSH0).is_some());
    }

    #[test]
    fn test_staticcall_cost_tracks_schedule() {
        assert_eq!(table(Fork::Istanbul).get(STATICCALL).unwrap().gas, 700);
        assert_eq!(table(Fork::Berlin).get(STATICCALL).unwrap().gas, 100);
    }

    #[test]
    fn test_stack_shapes() {
        let set = table(Fork::Shanghai);
        let dup16 = set.get(DUP16).unwrap();
        assert_eq!((dup16.name, dup16.inputs, dup16.outputs), ("DUP16", 16, 17));
        let swap1 = set.get(SWAP1).unwrap();
        assert_eq!((swap1.name, swap1.inputs, swap1.outputs), ("SWAP1", 2, 2));
        assert_eq!(set.get(PUSH32).unwrap().name, "PUSH32");
    }

    #[test]
    fn test_undefined_opcodes() {
        let set = table(Fork::Shanghai);
        assert!(set.get(0x0c).is_none());
        assert!(set.get(0xf1).is_none());
        assert_eq!(set.fork(), Fork::Shanghai);
        // 39 single entries + 32 PUSH + 16 DUP + 16 SWAP
        assert_eq!(set.len(), 103);
        assert_eq!(table(Fork::Byzantium).len(), 99);
    }
}
