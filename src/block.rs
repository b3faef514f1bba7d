//! The AES-128 block cipher collaborator.
//!
//! XEX treats AES-128 as a black box: key expansion, single-block encrypt,
//! single-block decrypt. This module is the only place in the crate that
//! touches an actual AES implementation; everything above it goes through
//! [`Aes128Block`].

use aes::Aes128;
use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};

/// A 16-byte AES block.
pub type Block = [u8; 16];
/// A 16-byte AES-128 key.
pub type Key = [u8; 16];

/// Stands in for the "AES is available and correct" external collaborator.
///
/// Implementors expand a 16-byte key once and then perform any number of
/// single-block encrypt/decrypt operations under that schedule.
pub trait Aes128Block {
    /// An expanded round-key schedule, opaque to callers.
    type Schedule;

    /// Expand `key` into a round-key schedule.
    fn expand(key: &Key) -> Self::Schedule;

    /// Encrypt one 16-byte block under `schedule`.
    fn encrypt(block: &Block, schedule: &Self::Schedule) -> Block;

    /// Decrypt one 16-byte block under `schedule`.
    fn decrypt(block: &Block, schedule: &Self::Schedule) -> Block;
}

/// [`Aes128Block`] backed by the RustCrypto `aes` crate.
pub struct RustCryptoAes128;

impl Aes128Block for RustCryptoAes128 {
    type Schedule = Aes128;

    fn expand(key: &Key) -> Self::Schedule {
        Aes128::new(GenericArray::from_slice(key))
    }

    fn encrypt(block: &Block, schedule: &Self::Schedule) -> Block {
        let mut ga = *GenericArray::from_slice(block);
        schedule.encrypt_block(&mut ga);
        ga.into()
    }

    fn decrypt(block: &Block, schedule: &Self::Schedule) -> Block {
        let mut ga = *GenericArray::from_slice(block);
        schedule.decrypt_block(&mut ga);
        ga.into()
    }
}
