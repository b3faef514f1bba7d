//! In-memory [`NvDriver`] for tests and host tooling.
//!
//! Gated behind the `sim` feature (on by default). A real device supplies
//! its own driver talking to actual NOR flash or similar; this one just
//! backs onto a `Vec<u8>`.

use crate::error::NvError;
use crate::nv::NvDriver;

/// A fixed-size, zero-initialized byte array standing in for NV storage.
pub struct VecNv {
    bytes: Vec<u8>,
    reads: usize,
    writes: usize,
    flushes: usize,
    last_written_address: Option<u32>,
    written_addresses: Vec<u32>,
}

impl VecNv {
    /// A `size`-byte store, all zero.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
            reads: 0,
            writes: 0,
            flushes: 0,
            last_written_address: None,
            written_addresses: Vec::new(),
        }
    }

    /// Adopts `bytes` as the backing store, e.g. to reload a snapshot taken
    /// with [`VecNv::snapshot`] and simulate a power cycle.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            reads: 0,
            writes: 0,
            flushes: 0,
            last_written_address: None,
            written_addresses: Vec::new(),
        }
    }

    /// A copy of the underlying bytes, for asserting on raw (ciphertext)
    /// contents in tests.
    pub fn snapshot(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn last_written_address(&self) -> Option<u32> {
        self.last_written_address
    }

    pub fn written_addresses(&self) -> Vec<u32> {
        self.written_addresses.clone()
    }
}

impl NvDriver for VecNv {
    fn nv_read(&mut self, buf: &mut [u8], address: u32) -> Result<(), NvError> {
        self.reads += 1;
        let start = address as usize;
        let end = start + buf.len();
        let slice = self.bytes.get(start..end).ok_or(NvError::ReadFailed {
            address,
            len: buf.len() as u32,
        })?;
        buf.copy_from_slice(slice);
        Ok(())
    }

    fn nv_write(&mut self, buf: &[u8], address: u32) -> Result<(), NvError> {
        self.writes += 1;
        let start = address as usize;
        let end = start + buf.len();
        let slice = self.bytes.get_mut(start..end).ok_or(NvError::WriteFailed {
            address,
            len: buf.len() as u32,
        })?;
        slice.copy_from_slice(buf);
        self.last_written_address = Some(address);
        self.written_addresses.push(address);
        Ok(())
    }

    fn nv_flush(&mut self) -> Result<(), NvError> {
        self.flushes += 1;
        Ok(())
    }
}
