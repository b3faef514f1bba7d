//! Read-modify-write layer mapping arbitrary `(address, length)` NV ranges
//! onto 16-byte XEX-encrypted storage blocks.

use crate::block::Block;
use crate::error::NvError;
use crate::keystore::KeyStore;
use crate::nv::NvDriver;
use crate::xex::{xex_decrypt, xex_encrypt};

const BLOCK_SIZE: u32 = 16;
const BLOCK_MASK: u32 = !0xF;

fn block_start(address: u32) -> u32 {
    address & BLOCK_MASK
}

fn block_offset(address: u32) -> usize {
    (address & 0xF) as usize
}

/// The data-unit id for the block starting at `block`: the block's address,
/// as a little-endian u32, in the low 4 bytes, zero elsewhere.
fn data_unit_id(block: u32) -> Block {
    let mut n = [0u8; 16];
    n[0..4].copy_from_slice(&block.to_le_bytes());
    n
}

/// Wraps an [`NvDriver`] to transparently encrypt/decrypt 16-byte blocks
/// with XEX, keyed by a [`KeyStore`].
///
/// Each 16-byte NV block is its own XEX data unit, identified by its
/// address, so every call to the underlying XEX primitive uses `seq = 1`
/// (see the module docs on why `seq = 0` is avoided).
pub struct EncryptedNv<D> {
    driver: D,
}

impl<D: NvDriver> EncryptedNv<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Gives back the wrapped driver, e.g. to call `nv_flush` directly.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Encrypts `data` (overlaying it into the existing plaintext of each
    /// touched block) and writes it to NV starting at `address`.
    ///
    /// A no-op, performing zero NV accesses, when `data` is empty. Returns
    /// the first error encountered; on error, blocks already written remain
    /// written (no rollback).
    pub fn encrypted_nv_write(
        &mut self,
        keys: &KeyStore,
        data: &[u8],
        address: u32,
    ) -> Result<(), NvError> {
        let length = data.len() as u32;
        if length == 0 {
            return Ok(());
        }

        let last_byte = address as u64 + length as u64 - 1;
        let last_block = block_start(last_byte as u32);

        let mut cursor = 0usize;
        let mut offset = block_offset(address);
        let mut block = block_start(address);
        loop {
            log::trace!("encrypted_nv_write: touching block {block:#x}");
            let mut ciphertext = [0u8; 16];
            self.driver.nv_read(&mut ciphertext, block).map_err(|e| {
                log::warn!("encrypted_nv_write: read failed at {block:#x}: {e}");
                e
            })?;

            let n = data_unit_id(block);
            let mut plaintext = xex_decrypt(
                &ciphertext,
                &n,
                1,
                keys.tweak_key(),
                keys.encrypt_key(),
            );

            while cursor < data.len() && offset < 16 {
                plaintext[offset] = data[cursor];
                offset += 1;
                cursor += 1;
            }
            offset = 0;

            let ciphertext = xex_encrypt(&plaintext, &n, 1, keys.tweak_key(), keys.encrypt_key());
            self.driver.nv_write(&ciphertext, block).map_err(|e| {
                log::warn!("encrypted_nv_write: write failed at {block:#x}: {e}");
                e
            })?;

            if block == last_block {
                break;
            }
            block += BLOCK_SIZE;
        }
        Ok(())
    }

    /// Decrypts NV blocks covering `[address, address + data.len())` and
    /// fills `data` from the decrypted plaintext.
    ///
    /// A no-op, performing zero NV accesses, when `data` is empty.
    pub fn encrypted_nv_read(
        &mut self,
        keys: &KeyStore,
        data: &mut [u8],
        address: u32,
    ) -> Result<(), NvError> {
        let length = data.len() as u32;
        if length == 0 {
            return Ok(());
        }

        let last_byte = address as u64 + length as u64 - 1;
        let last_block = block_start(last_byte as u32);

        let mut cursor = 0usize;
        let mut offset = block_offset(address);
        let mut block = block_start(address);
        loop {
            log::trace!("encrypted_nv_read: touching block {block:#x}");
            let mut ciphertext = [0u8; 16];
            self.driver.nv_read(&mut ciphertext, block).map_err(|e| {
                log::warn!("encrypted_nv_read: read failed at {block:#x}: {e}");
                e
            })?;

            let n = data_unit_id(block);
            let plaintext = xex_decrypt(
                &ciphertext,
                &n,
                1,
                keys.tweak_key(),
                keys.encrypt_key(),
            );

            while cursor < data.len() && offset < 16 {
                data[cursor] = plaintext[offset];
                offset += 1;
                cursor += 1;
            }
            offset = 0;

            if block == last_block {
                break;
            }
            block += BLOCK_SIZE;
        }
        Ok(())
    }
}
