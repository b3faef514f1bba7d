//! The small status taxonomy surfaced by the NV driver collaborator.

use thiserror::Error;

/// Everything that can go wrong talking to non-volatile storage.
///
/// The core introduces no error variants of its own beyond these; it does
/// not validate `address`/`length` and trusts the driver (or the caller) to
/// enforce bounds.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NvError {
    #[error("nv read failed at address {address:#x} (len {len})")]
    ReadFailed { address: u32, len: u32 },
    #[error("nv write failed at address {address:#x} (len {len})")]
    WriteFailed { address: u32, len: u32 },
    #[error("nv flush failed")]
    FlushFailed,
}
