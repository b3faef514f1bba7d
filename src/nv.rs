//! Contract for the raw, unencrypted NV storage driver.
//!
//! A real implementation talks to SPI NOR flash or similar; it is external
//! to this crate (see `sim` for a `Vec<u8>`-backed stand-in used by tests and
//! host tooling).

use crate::error::NvError;

/// A byte-addressable, possibly-buffered persistence device.
pub trait NvDriver {
    /// Read exactly `buf.len()` bytes starting at `address`.
    fn nv_read(&mut self, buf: &mut [u8], address: u32) -> Result<(), NvError>;

    /// Write exactly `buf.len()` bytes starting at `address`. The driver may
    /// buffer this; call [`NvDriver::nv_flush`] for durability.
    fn nv_write(&mut self, buf: &[u8], address: u32) -> Result<(), NvError>;

    /// Force any buffered writes out to the physical medium. Not called by
    /// the core itself; exposed for callers that need a durability point.
    fn nv_flush(&mut self) -> Result<(), NvError>;
}
