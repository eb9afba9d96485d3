//! Growable recording buffer
//!
//! Append-only byte arena that backs an in-progress recording. Capacity
//! doubles on demand; growth copies the written region into fresh storage
//! so earlier offsets stay valid and their bytes never change.

use super::types::DEFAULT_BUFFER_CAPACITY;

/// Append-only recording storage
#[derive(Debug)]
pub struct RecordingBuffer {
    bytes: Box<[u8]>,
    write_offset: usize,
    name: String,
}

impl RecordingBuffer {
    /// Create a buffer with the default 64 KiB capacity
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, DEFAULT_BUFFER_CAPACITY)
    }

    /// Create a buffer with an explicit starting capacity (minimum 1 byte)
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity.max(1)].into_boxed_slice(),
            write_offset: 0,
            name: name.into(),
        }
    }

    /// Grow until `additional` more bytes fit
    pub fn ensure_capacity(&mut self, additional: usize) {
        let needed = self.write_offset + additional;
        if needed <= self.bytes.len() {
            return;
        }

        let mut capacity = self.bytes.len();
        while capacity < needed {
            capacity *= 2;
        }

        let mut grown = vec![0u8; capacity].into_boxed_slice();
        grown[..self.write_offset].copy_from_slice(&self.bytes[..self.write_offset]);
        self.bytes = grown;

        tracing::trace!(capacity, name = %self.name, "Recording buffer grown");
    }

    /// Append raw bytes
    pub fn append_bytes(&mut self, data: &[u8]) {
        self.ensure_capacity(data.len());
        let end = self.write_offset + data.len();
        self.bytes[self.write_offset..end].copy_from_slice(data);
        self.write_offset = end;
    }

    /// Append text, one byte per character
    ///
    /// Characters outside the single-byte range are truncated to their low
    /// byte; recordings only ever write ASCII digit lines here.
    pub fn append_text(&mut self, text: &str) {
        let count = text.chars().count();
        self.ensure_capacity(count);
        for ch in text.chars() {
            self.bytes[self.write_offset] = ch as u32 as u8;
            self.write_offset += 1;
        }
    }

    /// Exactly the written region
    pub fn finalize(&self) -> &[u8] {
        &self.bytes[..self.write_offset]
    }

    /// Consume the buffer, keeping only the written region
    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = self.bytes.into_vec();
        bytes.truncate(self.write_offset);
        bytes
    }

    /// Next write position
    pub fn write_offset(&self) -> usize {
        self.write_offset
    }

    /// Current allocated capacity
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Name the recording will be exported under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.write_offset == 0
    }
}
