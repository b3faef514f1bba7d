//! XEX ("XOR-Encrypt-XOR") tweakable block cipher construction, per Rogaway
//! 2004[^1]. With ciphertext stealing omitted (not needed when all regions
//! are 16-byte aligned) and independent tweak/encryption keys, this is
//! bit-exact with AES-XTS-128.
//!
//! [^1]: "Efficient Instantiations of Tweakable Blockciphers and Refinements
//! to Modes OCB and PMAC", Phillip Rogaway, 2004.

use crate::block::{Aes128Block, Block, Key, RustCryptoAes128};
use crate::gf128;

fn xor_16(dst: &mut Block, src: &Block) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Derives the tweak offset `delta = AES_encrypt(n, tweak_key)` doubled in
/// GF(2^128) `seq` times.
fn delta<C: Aes128Block>(n: &Block, seq: u8, tweak_key: &Key) -> Block {
    let schedule = C::expand(tweak_key);
    let mut delta = C::encrypt(n, &schedule);
    for _ in 0..seq {
        gf128::double(&mut delta);
    }
    delta
}

/// Encrypts one 16-byte block under XEX.
///
/// `n` identifies the data unit (e.g. a sector or, in this crate's adapter,
/// a block address) as 16 little-endian bytes. `seq` is the block's index
/// within that data unit.
///
/// # Warning
/// Calling with `seq = 0` produces `delta = AES_encrypt(n, tweak_key)`
/// directly, a known-weak XEX configuration (Rogaway 2004, Section 6). The
/// encrypted-NV adapter in this crate never does this; it always passes
/// `seq = 1`. Callers invoking this primitive directly (e.g. a known-answer
/// test harness) should avoid `seq = 0` outside of reproducing such vectors.
pub fn xex_encrypt(input: &Block, n: &Block, seq: u8, tweak_key: &Key, encrypt_key: &Key) -> Block {
    xex_encrypt_with::<RustCryptoAes128>(input, n, seq, tweak_key, encrypt_key)
}

/// Decrypts one 16-byte block under XEX. See [`xex_encrypt`] for parameters
/// and the `seq = 0` warning.
pub fn xex_decrypt(input: &Block, n: &Block, seq: u8, tweak_key: &Key, encrypt_key: &Key) -> Block {
    xex_decrypt_with::<RustCryptoAes128>(input, n, seq, tweak_key, encrypt_key)
}

/// Same as [`xex_encrypt`], generic over the AES-128 backend. Exposed so the
/// backend can be swapped (e.g. for a hardware-accelerated implementation)
/// without touching the XEX math.
pub fn xex_encrypt_with<C: Aes128Block>(
    input: &Block,
    n: &Block,
    seq: u8,
    tweak_key: &Key,
    encrypt_key: &Key,
) -> Block {
    let delta = delta::<C>(n, seq, tweak_key);
    let mut buf = *input;
    xor_16(&mut buf, &delta);
    let schedule = C::expand(encrypt_key);
    let mut out = C::encrypt(&buf, &schedule);
    xor_16(&mut out, &delta);
    out
}

/// Same as [`xex_decrypt`], generic over the AES-128 backend.
pub fn xex_decrypt_with<C: Aes128Block>(
    input: &Block,
    n: &Block,
    seq: u8,
    tweak_key: &Key,
    encrypt_key: &Key,
) -> Block {
    let delta = delta::<C>(n, seq, tweak_key);
    let mut buf = *input;
    xor_16(&mut buf, &delta);
    let schedule = C::expand(encrypt_key);
    let mut out = C::decrypt(&buf, &schedule);
    xor_16(&mut out, &delta);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWEAK_KEY: Key = [1; 16];
    const ENCRYPT_KEY: Key = [2; 16];
    const N: Block = [0; 16];

    #[test]
    fn decrypt_undoes_encrypt() {
        let plaintext: Block = *b"0123456789abcdef";
        let ciphertext = xex_encrypt(&plaintext, &N, 1, &TWEAK_KEY, &ENCRYPT_KEY);
        assert_ne!(ciphertext, plaintext);
        assert_eq!(
            xex_decrypt(&ciphertext, &N, 1, &TWEAK_KEY, &ENCRYPT_KEY),
            plaintext
        );
    }

    #[test]
    fn different_seq_gives_different_ciphertext() {
        let plaintext: Block = [0x42; 16];
        let c1 = xex_encrypt(&plaintext, &N, 1, &TWEAK_KEY, &ENCRYPT_KEY);
        let c2 = xex_encrypt(&plaintext, &N, 2, &TWEAK_KEY, &ENCRYPT_KEY);
        assert_ne!(c1, c2);
    }

    #[test]
    fn different_data_unit_gives_different_ciphertext() {
        let plaintext: Block = [0x42; 16];
        let mut n2 = N;
        n2[0] = 1;
        let c1 = xex_encrypt(&plaintext, &N, 1, &TWEAK_KEY, &ENCRYPT_KEY);
        let c2 = xex_encrypt(&plaintext, &n2, 1, &TWEAK_KEY, &ENCRYPT_KEY);
        assert_ne!(c1, c2);
    }

    #[test]
    fn swapping_tweak_and_encrypt_key_changes_ciphertext() {
        // Guards against the argument-order confusion the original C API
        // invited: swapping the two keys must not silently decrypt correctly.
        let plaintext: Block = [0x11; 16];
        let swapped = xex_encrypt(&plaintext, &N, 1, &ENCRYPT_KEY, &TWEAK_KEY);
        let normal = xex_encrypt(&plaintext, &N, 1, &TWEAK_KEY, &ENCRYPT_KEY);
        assert_ne!(swapped, normal);
    }

    #[test]
    fn seq_zero_is_distinct_from_seq_one() {
        // seq = 0 is legal (if discouraged) on the raw primitive.
        let plaintext: Block = [0x77; 16];
        let c0 = xex_encrypt(&plaintext, &N, 0, &TWEAK_KEY, &ENCRYPT_KEY);
        let c1 = xex_encrypt(&plaintext, &N, 1, &TWEAK_KEY, &ENCRYPT_KEY);
        assert_ne!(c0, c1);
        assert_eq!(xex_decrypt(&c0, &N, 0, &TWEAK_KEY, &ENCRYPT_KEY), plaintext);
    }
}
