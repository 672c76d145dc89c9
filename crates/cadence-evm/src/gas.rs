//! Gas schedule

use crate::fork::Fork;
use cadence_primitives::Gas;

/// Fee constants for one fork. Read once when the instruction set is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasSchedule {
    /// Zero tier (STOP, RETURN, REVERT)
    pub zero: Gas,
    /// Base tier
    pub base: Gas,
    /// Very-low tier
    pub very_low: Gas,
    /// Low tier
    pub low: Gas,
    /// Mid tier
    pub mid: Gas,
    /// High tier
    pub high: Gas,
    /// JUMPDEST
    pub jumpdest: Gas,
    /// Linear memory cost per word
    pub memory_word: Gas,
    /// Quadratic memory divisor
    pub memory_quad_divisor: Gas,
    /// Copy cost per word
    pub copy_word: Gas,
    /// KECCAK256 base
    pub keccak: Gas,
    /// KECCAK256 per word
    pub keccak_word: Gas,
    /// Base cost of a call to a warm account
    pub warm_call: Gas,
}

impl GasSchedule {
    /// Schedule active at `fork`
    pub fn for_fork(fork: Fork) -> Self {
        let warm_call = if fork.is_enabled(Fork::Berlin) { 100 } else { 700 };
        Self {
            zero: 0,
            base: 2,
            very_low: 3,
            low: 5,
            mid: 8,
            high: 10,
            jumpdest: 1,
            memory_word: 3,
            memory_quad_divisor: 512,
            copy_word: 3,
            keccak: 30,
            keccak_word: 6,
            warm_call,
        }
    }

    /// Total cost of `words` words of memory
    pub fn memory_cost(&self, words: u64) -> Gas {
        self.memory_word
            .saturating_mul(words)
            .saturating_add(words.saturating_mul(words) / self.memory_quad_divisor)
    }

    /// Cost of growing memory from `current_words` to `new_words`
    pub fn memory_expansion_cost(&self, current_words: u64, new_words: u64) -> Gas {
        if new_words <= current_words {
            return 0;
        }
        self.memory_cost(new_words) - self.memory_cost(current_words)
    }

    /// Copy cost for `len` bytes
    pub fn copy_cost(&self, len: usize) -> Gas {
        self.copy_word.saturating_mul(words(len))
    }

    /// Dynamic part of KECCAK256 for `len` bytes
    pub fn keccak_word_cost(&self, len: usize) -> Gas {
        self.keccak_word.saturating_mul(words(len))
    }
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self::for_fork(Fork::default())
    }
}

/// Number of 32-byte words covering `len` bytes
pub fn words(len: usize) -> u64 {
    (len as u64).div_ceil(32)
}
