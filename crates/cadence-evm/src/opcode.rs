//! Opcode byte values (Yellow Paper Appendix H)

#![allow(missing_docs)]

// Stop and arithmetic
pub const STOP: u8 = 0x00;
pub const ADD: u8 = 0x01;
pub const MUL: u8 = 0x02;
pub const SUB: u8 = 0x03;
pub const DIV: u8 = 0x04;
pub const MOD: u8 = 0x06;

// Comparison and bitwise logic
pub const LT: u8 = 0x10;
pub const GT: u8 = 0x11;
pub const EQ: u8 = 0x14;
pub const ISZERO: u8 = 0x15;
pub const AND: u8 = 0x16;
pub const OR: u8 = 0x17;
pub const XOR: u8 = 0x18;
pub const NOT: u8 = 0x19;
pub const SHL: u8 = 0x1B;
pub const SHR: u8 = 0x1C;
pub const SAR: u8 = 0x1D;

pub const KECCAK256: u8 = 0x20;

// Environment
pub const CALLDATALOAD: u8 = 0x35;
pub const CALLDATASIZE: u8 = 0x36;
pub const CALLDATACOPY: u8 = 0x37;
pub const CODESIZE: u8 = 0x38;
pub const RETURNDATASIZE: u8 = 0x3D;
pub const RETURNDATACOPY: u8 = 0x3E;

// Stack, memory and flow
pub const POP: u8 = 0x50;
pub const MLOAD: u8 = 0x51;
pub const MSTORE: u8 = 0x52;
pub const MSTORE8: u8 = 0x53;
pub const JUMP: u8 = 0x56;
pub const JUMPI: u8 = 0x57;
pub const PC: u8 = 0x58;
pub const MSIZE: u8 = 0x59;
pub const GAS: u8 = 0x5A;
pub const JUMPDEST: u8 = 0x5B;
pub const PUSH0: u8 = 0x5F;
pub const PUSH1: u8 = 0x60;
pub const PUSH2: u8 = 0x61;
pub const PUSH32: u8 = 0x7F;
pub const DUP1: u8 = 0x80;
pub const DUP16: u8 = 0x8F;
pub const SWAP1: u8 = 0x90;
pub const SWAP16: u8 = 0x9F;

// System
pub const RETURN: u8 = 0xF3;
pub const STATICCALL: u8 = 0xFA;
pub const REVERT: u8 = 0xFD;
pub const INVALID: u8 = 0xFE;

/// Inline operand width of PUSH1..PUSH32 (0 for everything else)
pub const fn push_size(opcode: u8) -> usize {
    if opcode >= PUSH1 && opcode <= PUSH32 {
        (opcode - PUSH0) as usize
    } else {
        0
    }
}

/// Whether `opcode` is PUSH1..PUSH32
pub const fn is_push(opcode: u8) -> bool {
    push_size(opcode) > 0
}

/// DUP depth (1 for DUP1, 0 for non-DUP)
pub const fn dup_depth(opcode: u8) -> usize {
    if opcode >= DUP1 && opcode <= DUP16 {
        (opcode - DUP1 + 1) as usize
    } else {
        0
    }
}

/// SWAP depth (1 for SWAP1, 0 for non-SWAP)
pub const fn swap_depth(opcode: u8) -> usize {
    if opcode >= SWAP1 && opcode <= SWAP16 {
        (opcode - SWAP1 + 1) as usize
    } else {
        0
    }
}
