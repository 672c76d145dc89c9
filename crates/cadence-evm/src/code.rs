//! Contract code, jump-destination analysis and the shared code cache

use crate::opcode::{self, JUMPDEST};
use crate::stack::{word_to_usize, Word};
use bytes::Bytes;
use cadence_crypto::keccak256;
use cadence_primitives::H256;
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Offsets of JUMPDEST bytes that sit on instruction boundaries
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpDestinations {
    bits: Vec<u64>,
    len: usize,
}

impl JumpDestinations {
    /// Forward scan of `code`, skipping PUSH operands
    pub fn analyze(code: &[u8]) -> Self {
        let mut bits = vec![0u64; code.len().div_ceil(64)];
        let mut pc = 0;
        while pc < code.len() {
            let op = code[pc];
            if op == JUMPDEST {
                bits[pc / 64] |= 1 << (pc % 64);
            }
            pc += 1 + opcode::push_size(op);
        }
        Self {
            bits,
            len: code.len(),
        }
    }

    /// Whether `offset` is a valid jump target
    pub fn contains(&self, offset: usize) -> bool {
        offset < self.len && self.bits[offset / 64] & (1 << (offset % 64)) != 0
    }

    /// Number of valid targets
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Valid targets in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&offset| self.contains(offset))
    }
}

/// Immutable contract code keyed by its Keccak-256 hash.
///
/// Jump destinations are computed on the first validity check and kept for
/// the lifetime of the value; frames sharing an `Arc<Code>` share the
/// analysis.
#[derive(Debug)]
pub struct Code {
    bytes: Bytes,
    hash: H256,
    jump_destinations: OnceLock<JumpDestinations>,
}

impl Code {
    /// Wrap raw bytecode
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let hash = keccak256(&bytes);
        Self::with_hash(bytes, hash)
    }

    fn with_hash(bytes: Bytes, hash: H256) -> Self {
        Self {
            bytes,
            hash,
            jump_destinations: OnceLock::new(),
        }
    }

    /// Raw bytes
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Keccak-256 of the bytes
    pub fn hash(&self) -> H256 {
        self.hash
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether there is no code
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Opcode at `pc`; STOP past the end
    pub fn opcode_at(&self, pc: usize) -> u8 {
        self.bytes.get(pc).copied().unwrap_or(opcode::STOP)
    }

    /// Jump destinations, analysing on first use
    pub fn jump_destinations(&self) -> &JumpDestinations {
        self.jump_destinations.get_or_init(|| {
            let dests = JumpDestinations::analyze(&self.bytes);
            debug!(
                code_hash = %self.hash,
                len = self.bytes.len(),
                destinations = dests.count(),
                "Analyzed jump destinations"
            );
            dests
        })
    }

    /// Whether the analysis has already run
    pub fn is_analyzed(&self) -> bool {
        self.jump_destinations.get().is_some()
    }

    /// Whether `offset` is a valid jump target
    pub fn is_valid_jump_destination(&self, offset: usize) -> bool {
        offset < self.len() && self.jump_destinations().contains(offset)
    }

    /// Validity check for a stack word. Values that do not fit a native
    /// offset are never valid.
    pub fn is_valid_jump_word(&self, destination: &Word) -> bool {
        word_to_usize(destination).is_some_and(|offset| self.is_valid_jump_destination(offset))
    }
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Code {}

/// Deduplicates `Code` by content hash so identical bytecode is analysed once
#[derive(Debug)]
pub struct CodeCache {
    entries: DashMap<H256, Arc<Code>>,
    capacity: usize,
}

impl CodeCache {
    /// Cache holding at most `capacity` distinct bytecodes
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Shared `Code` for `bytes`
    pub fn get_or_insert(&self, bytes: impl Into<Bytes>) -> Arc<Code> {
        let bytes = bytes.into();
        let hash = keccak256(&bytes);
        if let Some(code) = self.entries.get(&hash) {
            return Arc::clone(code.value());
        }
        if self.entries.len() >= self.capacity {
            debug!(capacity = self.capacity, "Code cache full, clearing");
            self.entries.clear();
        }
        // A racing insert of the same hash keeps whichever entry landed first
        Arc::clone(
            self.entries
                .entry(hash)
                .or_insert_with(|| Arc::new(Code::with_hash(bytes, hash)))
                .value(),
        )
    }

    /// Cached entry for `hash`
    pub fn get(&self, hash: &H256) -> Option<Arc<Code>> {
        self.entries.get(hash).map(|e| Arc::clone(e.value()))
    }

    /// Number of cached bytecodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
