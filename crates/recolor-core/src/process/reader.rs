#![cfg_attr(not(target_os = "windows"), allow(dead_code, unused_variables))]

use crate::error::{Error, Result};
use crate::process::ProcessHandle;

#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

/// Read access to a process or an in-memory stand-in.
pub trait ReadMemory {
    /// Read exactly `size` bytes at `address`.
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Base address of the main module.
    fn base_address(&self) -> u64;
}

pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    #[cfg(target_os = "windows")]
    fn read_bytes_impl(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        let mut bytes_read = 0;

        // SAFETY: the handle was opened with PROCESS_VM_READ and buffer holds
        // `size` writable bytes. An invalid address fails the call, which is
        // reported through Result.
        unsafe {
            ReadProcessMemory(
                self.process.handle(),
                address as *const _,
                buffer.as_mut_ptr() as *mut _,
                size,
                Some(&mut bytes_read),
            )
            .map_err(|e| Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            })?;
        }

        // Palette windows need every byte; a partial read is a failed read
        if bytes_read != size {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Expected {} bytes, read {}", size, bytes_read),
            });
        }

        Ok(buffer)
    }

    #[cfg(not(target_os = "windows"))]
    fn read_bytes_impl(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "Windows only: memory reading not supported on this platform".to_string(),
        })
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.read_bytes_impl(address, size)
    }

    fn base_address(&self) -> u64 {
        self.process.base_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockMemory;

    #[test]
    fn test_read_bytes() {
        let reader = MockMemory::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(reader.read_bytes(0x1001, 3).unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let reader = MockMemory::new(vec![0x01, 0x02]);
        assert!(matches!(
            reader.read_bytes(0x1000, 4),
            Err(Error::MemoryReadFailed { address: 0x1000, .. })
        ));
    }

    #[test]
    fn test_base_address() {
        let reader = MockMemory::new(vec![]);
        assert_eq!(reader.base_address(), 0x1000);
    }
}
