//! In-memory process stand-in for tests.
//!
//! Implements both `ReadMemory` and `WriteMemory` over a byte buffer mapped
//! at a base address, so the scanner and write-back can run without a live
//! process.

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::process::{ReadMemory, WriteMemory};

#[derive(Debug, Clone)]
pub struct MockMemory {
    data: RefCell<Vec<u8>>,
    base: u64,
}

impl MockMemory {
    /// Map `data` at base address 0x1000.
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_base(data, 0x1000)
    }

    pub fn with_base(data: Vec<u8>, base: u64) -> Self {
        Self {
            data: RefCell::new(data),
            base,
        }
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    /// Copy of the current buffer contents.
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    fn range(&self, address: u64, size: usize) -> std::result::Result<(usize, usize), String> {
        if address < self.base {
            return Err(format!("Address below base (base=0x{:X})", self.base));
        }
        let offset = usize::try_from(address - self.base)
            .map_err(|_| "Address out of range".to_string())?;
        let len = self.data.borrow().len();
        match offset.checked_add(size) {
            Some(end) if end <= len => Ok((offset, end)),
            _ => Err(format!(
                "Out of bounds: offset={}, size={}, len={}",
                offset, size, len
            )),
        }
    }
}

impl ReadMemory for MockMemory {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let (start, end) = self
            .range(address, size)
            .map_err(|message| Error::MemoryReadFailed { address, message })?;
        Ok(self.data.borrow()[start..end].to_vec())
    }

    fn base_address(&self) -> u64 {
        self.base
    }
}

impl WriteMemory for MockMemory {
    fn write_bytes(&self, address: u64, bytes: &[u8]) -> Result<()> {
        let (start, end) = self
            .range(address, bytes.len())
            .map_err(|message| Error::MemoryWriteFailed { address, message })?;
        self.data.borrow_mut()[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

/// Fluent construction of mock memory layouts.
#[derive(Debug, Clone)]
pub struct MockMemoryBuilder {
    data: Vec<u8>,
    base: u64,
}

impl Default for MockMemoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            base: 0x1000,
        }
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Zero-fill the buffer up to `size` bytes.
    pub fn with_size(mut self, size: usize) -> Self {
        self.data.resize(size, 0);
        self
    }

    /// Write raw bytes at `offset` from base.
    pub fn write_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.ensure_size(offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Fill `len` bytes at `offset` with `value`.
    pub fn fill(mut self, offset: usize, len: usize, value: u8) -> Self {
        self.ensure_size(offset + len);
        self.data[offset..offset + len].fill(value);
        self
    }

    pub fn build(self) -> MockMemory {
        MockMemory::with_base(self.data, self.base)
    }

    fn ensure_size(&mut self, required: usize) {
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
    }
}
