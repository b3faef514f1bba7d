//! Encrypted non-volatile storage for a hardware wallet, built on an
//! XEX-mode (XTS-AES-128-equivalent) tweakable block cipher.
//!
//! A hardware wallet's private key material and account state live in NV
//! memory that is itself untrusted (removable, or readable by a side
//! channel an attacker controls). This crate sits between the wallet core
//! and a raw [`NvDriver`], transparently encrypting every 16-byte block
//! with a key that never leaves [`KeyStore`].
//!
//! Module map:
//! - [`gf128`]: doubling in GF(2^128), the tweak-update primitive.
//! - [`block`]: the AES-128 collaborator ([`block::Aes128Block`]).
//! - [`xex`]: the XEX tweakable cipher built from the two above.
//! - [`keystore`]: ownership, (in)equality, and scrubbing of key material.
//! - [`nv`]: the raw storage contract ([`nv::NvDriver`]) a real device implements.
//! - [`adapter`]: the read-modify-write layer tying it together ([`adapter::EncryptedNv`]).
//! - [`error`]: the [`error::NvError`] type surfaced by the above.
//! - [`sim`] (feature `sim`, default-on): an in-memory `NvDriver` for tests and host tooling.

pub mod adapter;
pub mod block;
pub mod error;
pub mod gf128;
pub mod keystore;
pub mod nv;
pub mod xex;

#[cfg(feature = "sim")]
pub mod sim;

pub use adapter::EncryptedNv;
pub use error::NvError;
pub use keystore::KeyStore;
pub use nv::NvDriver;
