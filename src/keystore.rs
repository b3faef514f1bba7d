//! Owner of the 32 bytes of active XEX key material.
//!
//! The original design (a hardware-wallet firmware core) used two
//! file-scoped mutable byte arrays. This crate prefers an explicit handle
//! (`KeyStore`) threaded through every call that needs the keys - it's
//! testable and makes ownership obvious - while [`singleton`] keeps a
//! process-wide handle around for call sites that need the original flat
//! free-function surface.

use std::sync::{Mutex, MutexGuard, OnceLock};

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::block::Key;

/// Owns `encrypt_key` and `tweak_key` for the lifetime of the handle.
///
/// `clear_key` overwrites both buffers with `0xFF` and then `0x00`, using
/// volatile writes so neither pass can be optimized away - this is
/// deliberately observable (see the `cfg(test)` hook below) even though the
/// public API only exposes the end state.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeyStore {
    encrypt_key: Key,
    tweak_key: Key,
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore {
    /// A freshly-zeroed key store.
    pub fn new() -> Self {
        Self {
            encrypt_key: [0; 16],
            tweak_key: [0; 16],
        }
    }

    /// Splits the 32-byte combined key into `encrypt_key` (bytes 0..16) and
    /// `tweak_key` (bytes 16..32), compatible with [`KeyStore::get_key`].
    pub fn set_key(&mut self, combined: &[u8; 32]) {
        self.encrypt_key.copy_from_slice(&combined[0..16]);
        self.tweak_key.copy_from_slice(&combined[16..32]);
        log::debug!("encryption key set");
    }

    /// Reassembles `encrypt_key || tweak_key` into a 32-byte combined key.
    pub fn get_key(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[0..16].copy_from_slice(&self.encrypt_key);
        out[16..32].copy_from_slice(&self.tweak_key);
        out
    }

    /// `encrypt_key`, for callers (e.g. the adapter) that need it directly.
    pub(crate) fn encrypt_key(&self) -> &Key {
        &self.encrypt_key
    }

    /// `tweak_key`, for callers (e.g. the adapter) that need it directly.
    pub(crate) fn tweak_key(&self) -> &Key {
        &self.tweak_key
    }

    /// False iff all 32 bytes of key material are zero.
    ///
    /// ORs every byte into a single accumulator before comparing it to zero,
    /// rather than short-circuiting on the first non-zero byte, so timing
    /// doesn't leak which byte (if any) was non-zero.
    pub fn is_key_nonzero(&self) -> bool {
        let mut acc = 0u8;
        for &b in self.encrypt_key.iter().chain(self.tweak_key.iter()) {
            acc |= b;
        }
        !bool::from(acc.ct_eq(&0u8))
    }

    /// Overwrites both key halves with `0xFF`, then with `0x00`. Both passes
    /// use volatile writes so an optimizer can't elide either of them.
    pub fn clear_key(&mut self) {
        volatile_fill(&mut self.encrypt_key, 0xFF);
        volatile_fill(&mut self.tweak_key, 0xFF);
        self.encrypt_key.zeroize();
        self.tweak_key.zeroize();
        log::debug!("encryption key cleared");
    }

    /// Test-only hook: performs the `0xFF` scrub pass and returns the
    /// resulting combined key *before* the zeroing pass, so tests can verify
    /// the intermediate write actually happened instead of only observing
    /// the final all-zero state.
    #[cfg(test)]
    pub(crate) fn clear_key_observe_intermediate(&mut self) -> [u8; 32] {
        volatile_fill(&mut self.encrypt_key, 0xFF);
        volatile_fill(&mut self.tweak_key, 0xFF);
        let intermediate = self.get_key();
        self.encrypt_key.zeroize();
        self.tweak_key.zeroize();
        intermediate
    }
}

fn volatile_fill(buf: &mut Key, value: u8) {
    for byte in buf.iter_mut() {
        // SAFETY: `byte` is a valid, exclusively-borrowed `u8` reference for
        // the duration of the write.
        unsafe { std::ptr::write_volatile(byte, value) };
    }
}

/// A process-wide [`KeyStore`] for call sites that cannot thread a handle
/// through, preserving the original API's flat
/// `set_encryption_key`/`get_encryption_key`/`is_encryption_key_nonzero`/
/// `clear_encryption_key` surface.
pub mod singleton {
    use super::*;

    static STORE: OnceLock<Mutex<KeyStore>> = OnceLock::new();

    fn store() -> MutexGuard<'static, KeyStore> {
        STORE
            .get_or_init(|| Mutex::new(KeyStore::new()))
            .lock()
            .expect("key store mutex poisoned")
    }

    pub fn set_encryption_key(combined: &[u8; 32]) {
        store().set_key(combined);
    }

    pub fn get_encryption_key() -> [u8; 32] {
        store().get_key()
    }

    pub fn is_encryption_key_nonzero() -> bool {
        store().is_key_nonzero()
    }

    pub fn clear_encryption_key() {
        store().clear_key();
    }
}
