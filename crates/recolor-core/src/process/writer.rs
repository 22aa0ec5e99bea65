#![cfg_attr(not(target_os = "windows"), allow(dead_code, unused_variables))]

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::process::ProcessHandle;
use crate::scanner::ScanResult;

#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::Debug::WriteProcessMemory;

/// Write access to a process or an in-memory stand-in.
pub trait WriteMemory {
    /// Write all of `bytes` at `address`.
    fn write_bytes(&self, address: u64, bytes: &[u8]) -> Result<()>;
}

pub struct MemoryWriter<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryWriter<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    #[cfg(target_os = "windows")]
    fn write_bytes_impl(&self, address: u64, bytes: &[u8]) -> Result<()> {
        let mut bytes_written = 0;

        // SAFETY: the handle was opened with PROCESS_VM_WRITE | PROCESS_VM_OPERATION
        // and `bytes` is a valid readable slice. An unmapped or protected target
        // fails the call, which is reported through Result.
        unsafe {
            WriteProcessMemory(
                self.process.handle(),
                address as *const _,
                bytes.as_ptr() as *const _,
                bytes.len(),
                Some(&mut bytes_written),
            )
            .map_err(|e| Error::MemoryWriteFailed {
                address,
                message: e.to_string(),
            })?;
        }

        if bytes_written != bytes.len() {
            return Err(Error::MemoryWriteFailed {
                address,
                message: format!("Expected {} bytes, wrote {}", bytes.len(), bytes_written),
            });
        }
        Ok(())
    }

    #[cfg(not(target_os = "windows"))]
    fn write_bytes_impl(&self, address: u64, _bytes: &[u8]) -> Result<()> {
        Err(Error::MemoryWriteFailed {
            address,
            message: "Windows only: memory writing not supported on this platform".to_string(),
        })
    }
}

impl WriteMemory for MemoryWriter<'_> {
    fn write_bytes(&self, address: u64, bytes: &[u8]) -> Result<()> {
        self.write_bytes_impl(address, bytes)
    }
}

/// Write each result's patched bytes back to its address.
///
/// Failures are logged and skipped. Returns the number of successful writes.
pub fn write_back<W: WriteMemory + ?Sized>(writer: &W, results: &[ScanResult]) -> usize {
    let mut written = 0;
    for result in results {
        match writer.write_bytes(result.address, &result.patched) {
            Ok(()) => {
                debug!(
                    "Wrote {} bytes at {:#x} (code {})",
                    result.patched.len(),
                    result.address,
                    result.code
                );
                written += 1;
            }
            Err(e) => warn!("Write-back failed: {}", e),
        }
    }
    info!("Wrote back {} of {} palettes", written, results.len());
    written
}
