//! Linear frame memory

use crate::stack::Word;

/// Byte-addressable memory, grown in 32-byte words and zero-filled
#[derive(Clone, Debug, Default)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Empty memory
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Size in bytes (always a multiple of 32)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Size in words
    pub fn words(&self) -> u64 {
        (self.data.len() / 32) as u64
    }

    /// Grow to cover `[offset, offset + size)`. Gas must already be paid.
    pub fn grow(&mut self, offset: usize, size: usize) {
        if size == 0 {
            return;
        }
        let end = offset.saturating_add(size);
        if end > self.data.len() {
            self.data.resize(end.div_ceil(32) * 32, 0);
        }
    }

    /// Read a word; bytes past the end read as zero
    pub fn load(&self, offset: usize) -> Word {
        let mut result = [0u8; 32];
        if offset < self.data.len() {
            let end = offset.saturating_add(32).min(self.data.len());
            result[..end - offset].copy_from_slice(&self.data[offset..end]);
        }
        result
    }

    /// Write a word
    pub fn store(&mut self, offset: usize, value: &Word) {
        self.store_slice(offset, value);
    }

    /// Write one byte
    pub fn store8(&mut self, offset: usize, value: u8) {
        self.grow(offset, 1);
        self.data[offset] = value;
    }

    /// Copy out `size` bytes; bytes past the end read as zero
    pub fn load_slice(&self, offset: usize, size: usize) -> Vec<u8> {
        let mut result = vec![0u8; size];
        if size > 0 && offset < self.data.len() {
            let end = offset.saturating_add(size).min(self.data.len());
            result[..end - offset].copy_from_slice(&self.data[offset..end]);
        }
        result
    }

    /// Write `data` at `offset`
    pub fn store_slice(&mut self, offset: usize, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.grow(offset, data.len());
        self.data[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Write `size` bytes taken from `source` at `source_offset`, zero-filling
    /// whatever lies past the end of `source`
    pub fn store_padded(
        &mut self,
        offset: usize,
        source: &[u8],
        source_offset: usize,
        size: usize,
    ) {
        if size == 0 {
            return;
        }
        self.grow(offset, size);
        let dest = &mut self.data[offset..offset + size];
        let available = source.len().saturating_sub(source_offset).min(size);
        if available > 0 {
            let end = source_offset + available;
            dest[..available].copy_from_slice(&source[source_offset..end]);
        }
        dest[available..].fill(0);
    }

    /// Raw contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
