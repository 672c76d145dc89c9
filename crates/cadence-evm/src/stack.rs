//! Operand stack and 256-bit word helpers

use crate::error::{EvmResult, HaltReason};
use primitive_types::U256;

/// Maximum stack depth
pub const MAX_STACK_SIZE: usize = 1024;

/// Stack word (big-endian)
pub type Word = [u8; 32];

/// Zero word
pub const WORD_ZERO: Word = [0u8; 32];

/// One
pub const WORD_ONE: Word = {
    let mut v = [0u8; 32];
    v[31] = 1;
    v
};

/// Operand stack (max 1024 words)
#[derive(Clone, Debug)]
pub struct Stack {
    data: Vec<Word>,
}

impl Stack {
    /// Empty stack
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(MAX_STACK_SIZE),
        }
    }

    /// Push a word
    pub fn push(&mut self, value: Word) -> EvmResult<()> {
        if self.data.len() >= MAX_STACK_SIZE {
            return Err(HaltReason::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Pop the top word
    pub fn pop(&mut self) -> EvmResult<Word> {
        self.data.pop().ok_or(HaltReason::StackUnderflow)
    }

    /// Word at `depth` (0 = top)
    pub fn peek(&self, depth: usize) -> EvmResult<&Word> {
        if depth >= self.data.len() {
            return Err(HaltReason::StackUnderflow);
        }
        Ok(&self.data[self.data.len() - 1 - depth])
    }

    /// Duplicate the word at `depth` (1 = top) onto the top
    pub fn dup(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 || depth > self.data.len() {
            return Err(HaltReason::StackUnderflow);
        }
        let value = self.data[self.data.len() - depth];
        self.push(value)
    }

    /// Swap the top with the word at `depth` (1 = second)
    pub fn swap(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 || depth >= self.data.len() {
            return Err(HaltReason::StackUnderflow);
        }
        let len = self.data.len();
        self.data.swap(len - 1, len - 1 - depth);
        Ok(())
    }

    /// Check that `inputs` words are present and the net growth stays within
    /// bounds
    pub fn require(&self, inputs: usize, outputs: usize) -> EvmResult<()> {
        let len = self.data.len();
        if len < inputs {
            return Err(HaltReason::StackUnderflow);
        }
        if len - inputs + outputs > MAX_STACK_SIZE {
            return Err(HaltReason::StackOverflow);
        }
        Ok(())
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

/// Word holding a u64
pub fn u64_to_word(value: u64) -> Word {
    let mut word = WORD_ZERO;
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Word as u64; `None` when the value does not fit
pub fn word_to_u64(word: &Word) -> Option<u64> {
    if word[..24].iter().any(|&b| b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[24..]);
    Some(u64::from_be_bytes(bytes))
}

/// Word as usize; `None` when the value does not fit
pub fn word_to_usize(word: &Word) -> Option<usize> {
    word_to_u64(word).and_then(|v| usize::try_from(v).ok())
}

/// Whether every byte is zero
pub fn word_is_zero(word: &Word) -> bool {
    word.iter().all(|&b| b == 0)
}

/// 1 or 0
pub fn bool_to_word(value: bool) -> Word {
    if value {
        WORD_ONE
    } else {
        WORD_ZERO
    }
}

/// Word as a wide integer
pub fn to_u256(word: &Word) -> U256 {
    U256::from_big_endian(word)
}

/// Wide integer as a word
pub fn from_u256(value: U256) -> Word {
    let mut word = WORD_ZERO;
    value.to_big_endian(&mut word);
    word
}
