//! AES-CBC encryption of a fixed-size plaintext followed by a random block.
//!
//! Staged buffer layout before encryption:
//! `[plaintext: P][random: R][zero padding: N - P - R]`
//!
//! The padding is never checked on decrypt; it is dropped together with the
//! random block. There is no MAC, so a wrong key or IV yields garbage rather
//! than an error.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::typenum::Unsigned;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, KeySizeUser};
use zeroize::Zeroize;

use crate::cipher::{CipherFor, KeyLen, SupportedKeyLen};
use crate::ciphertext::Ciphertext;
use crate::error::CodecError;
use crate::types::{padded_len, BLOCK_SIZE, IV_LEN};

type Encryptor<const B: usize> = cbc::Encryptor<CipherFor<B>>;
type Decryptor<const B: usize> = cbc::Decryptor<CipherFor<B>>;

/// Symmetric encryption engine for `P`-byte plaintexts padded with an
/// `R`-byte random block under a `B`-byte AES key.
///
/// `N` is the ciphertext length and must equal [`padded_len(P, R)`]; write it
/// as `{ padded_len(P, R) }` at the use site. Any other value is rejected
/// when the codec is built:
///
/// ```compile_fail
/// use sym_enc::SymmetricBlockCodec;
///
/// // 20 + 8 bytes need 32 bytes of ciphertext.
/// let _ = SymmetricBlockCodec::<20, 8, 16, 16>::new();
/// ```
///
/// `B` must be 16, 24 or 32 (AES-128/192/256):
///
/// ```compile_fail
/// use sym_enc::{padded_len, SymmetricBlockCodec};
///
/// let _ = SymmetricBlockCodec::<16, 16, 20, { padded_len(16, 16) }>::new();
/// ```
///
/// The codec owns a scratch buffer that every call overwrites, so all
/// operations take `&mut self`. Use one codec per thread, or guard a shared
/// one with a lock.
///
/// [`padded_len(P, R)`]: crate::padded_len
pub struct SymmetricBlockCodec<const P: usize, const R: usize, const B: usize, const N: usize> {
    scratch: [u8; N],
}

impl<const P: usize, const R: usize, const B: usize, const N: usize> SymmetricBlockCodec<P, R, B, N>
where
    KeyLen<B>: SupportedKeyLen,
{
    /// Plaintext length in bytes.
    pub const PLAINTEXT_LEN: usize = P;
    /// Random block length in bytes.
    pub const RANDOM_LEN: usize = R;
    /// Key length in bytes.
    pub const KEY_LEN: usize = B;
    /// Key length in bits, as handed to the key schedule.
    pub const KEY_BITS: usize = B * 8;
    /// IV length in bytes.
    pub const IV_LEN: usize = IV_LEN;
    /// Ciphertext length in bytes.
    pub const OUT_LEN: usize = N;
    /// Serialized ciphertext record length (`buf` then `iv`).
    pub const WIRE_LEN: usize = N + IV_LEN;

    const LAYOUT: () = {
        assert!(
            N == padded_len(P, R),
            "ciphertext length must be plaintext + random rounded up to the AES block size"
        );
        assert!(
            <CipherFor<B> as KeySizeUser>::KeySize::USIZE == B,
            "key length does not match the selected cipher"
        );
    };

    pub fn new() -> Self {
        let () = Self::LAYOUT;
        Self {
            scratch: [0u8; N],
        }
    }

    /// Encrypt `input || random` under `key` with the caller-supplied `iv`.
    ///
    /// Writes the ciphertext to `out.buf` and `iv` to `out.iv`. The IV must
    /// not be reused with the same key.
    pub fn encrypt_with_iv(
        &mut self,
        out: &mut Ciphertext<N>,
        input: &[u8; P],
        random: &[u8; R],
        key: &[u8; B],
        iv: &[u8; IV_LEN],
    ) {
        tracing::trace!(
            plaintext_len = P,
            random_len = R,
            key_bits = Self::KEY_BITS,
            out_len = N,
            "encrypting block"
        );

        self.stage(input, random);

        let mut cbc = Encryptor::<B>::new(
            GenericArray::from_slice(&key[..]),
            GenericArray::from_slice(&iv[..]),
        );
        for (src, dst) in self
            .scratch
            .chunks_exact(BLOCK_SIZE)
            .zip(out.buf.chunks_exact_mut(BLOCK_SIZE))
        {
            cbc.encrypt_block_b2b_mut(
                GenericArray::from_slice(src),
                GenericArray::from_mut_slice(dst),
            );
        }
        // The CBC state chains on its own copy of the IV; the record keeps the caller's.
        out.iv = *iv;

        self.scratch.zeroize();
    }

    /// Encrypt `input || random` under `key` using the IV already stored in
    /// `out.iv`. Produces the same `buf` as [`Self::encrypt_with_iv`] given
    /// the same IV, and leaves `out.iv` unchanged.
    pub fn encrypt_reusing_iv(
        &mut self,
        out: &mut Ciphertext<N>,
        input: &[u8; P],
        random: &[u8; R],
        key: &[u8; B],
    ) {
        let iv = out.iv;
        self.encrypt_with_iv(out, input, random, key, &iv);
    }

    /// Decrypt `input` under `key`, writing the leading `P` bytes to `out`.
    ///
    /// The random block and padding are discarded unchecked. A wrong key or
    /// IV is not detected; `out` then holds unrelated bytes.
    pub fn decrypt(&mut self, out: &mut [u8; P], input: &Ciphertext<N>, key: &[u8; B]) {
        tracing::trace!(
            plaintext_len = P,
            random_len = R,
            key_bits = Self::KEY_BITS,
            out_len = N,
            "decrypting block"
        );

        let mut cbc = Decryptor::<B>::new(
            GenericArray::from_slice(&key[..]),
            GenericArray::from_slice(&input.iv[..]),
        );
        for (src, dst) in input
            .buf
            .chunks_exact(BLOCK_SIZE)
            .zip(self.scratch.chunks_exact_mut(BLOCK_SIZE))
        {
            cbc.decrypt_block_b2b_mut(
                GenericArray::from_slice(src),
                GenericArray::from_mut_slice(dst),
            );
        }
        out.copy_from_slice(&self.scratch[..P]);

        self.scratch.zeroize();
    }

    /// [`Self::encrypt_with_iv`] into a fresh record.
    pub fn seal(
        &mut self,
        input: &[u8; P],
        random: &[u8; R],
        key: &[u8; B],
        iv: &[u8; IV_LEN],
    ) -> Ciphertext<N> {
        let mut out = Ciphertext::default();
        self.encrypt_with_iv(&mut out, input, random, key, iv);
        out
    }

    /// [`Self::decrypt`] into a fresh array.
    pub fn open(&mut self, input: &Ciphertext<N>, key: &[u8; B]) -> [u8; P] {
        let mut out = [0u8; P];
        self.decrypt(&mut out, input, key);
        out
    }

    fn stage(&mut self, input: &[u8; P], random: &[u8; R]) {
        self.scratch[..P].copy_from_slice(input);
        self.scratch[P..P + R].copy_from_slice(random);
        self.scratch[P + R..].fill(0);
    }
}

impl<const P: usize, const R: usize, const B: usize, const N: usize> Default
    for SymmetricBlockCodec<P, R, B, N>
where
    KeyLen<B>: SupportedKeyLen,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const P: usize, const R: usize, const B: usize, const N: usize> Drop
    for SymmetricBlockCodec<P, R, B, N>
{
    fn drop(&mut self) {
        self.scratch.zeroize();
    }
}

impl<const P: usize, const R: usize, const B: usize, const N: usize> std::fmt::Debug
    for SymmetricBlockCodec<P, R, B, N>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricBlockCodec")
            .field("plaintext_len", &P)
            .field("random_len", &R)
            .field("key_len", &B)
            .field("out_len", &N)
            .finish_non_exhaustive()
    }
}

/// Convert a dynamically sized key into the fixed-size array the codec takes.
pub fn key_from_slice<const B: usize>(key: &[u8]) -> Result<[u8; B], CodecError> {
    key.try_into().map_err(|_| CodecError::InvalidKeyLength {
        expected: B,
        got: key.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    type Codec = SymmetricBlockCodec<20, 8, 32, { padded_len(20, 8) }>;

    fn random_bytes<const L: usize>() -> [u8; L] {
        let mut out = [0u8; L];
        getrandom::getrandom(&mut out).unwrap();
        out
    }

    #[test]
    fn derived_sizes() {
        assert_eq!(Codec::PLAINTEXT_LEN, 20);
        assert_eq!(Codec::RANDOM_LEN, 8);
        assert_eq!(Codec::KEY_LEN, 32);
        assert_eq!(Codec::KEY_BITS, 256);
        assert_eq!(Codec::IV_LEN, 16);
        assert_eq!(Codec::OUT_LEN, 32);
        assert_eq!(Codec::WIRE_LEN, 48);
    }

    #[test]
    fn round_trip() {
        let mut codec = Codec::new();
        let input = random_bytes::<20>();
        let key = random_bytes::<32>();
        let iv = random_bytes::<16>();

        let ct = codec.seal(&input, &random_bytes::<8>(), &key, &iv);
        assert_eq!(codec.open(&ct, &key), input);
    }

    #[test]
    fn scratch_is_wiped_after_encrypt() {
        let mut codec = Codec::new();
        let mut out = Ciphertext::default();
        codec.encrypt_with_iv(&mut out, &[0xAB; 20], &[0xCD; 8], &[1u8; 32], &[2u8; 16]);
        assert_eq!(codec.scratch, [0u8; 32]);
    }

    #[test]
    fn scratch_is_wiped_after_decrypt() {
        let mut codec = Codec::new();
        let ct = codec.seal(&[0xAB; 20], &[0xCD; 8], &[1u8; 32], &[2u8; 16]);
        let mut out = [0u8; 20];
        codec.decrypt(&mut out, &ct, &[1u8; 32]);
        assert_eq!(out, [0xAB; 20]);
        assert_eq!(codec.scratch, [0u8; 32]);
    }

    #[test]
    fn stage_zero_fills_tail() {
        let mut codec = Codec::new();
        codec.scratch = [0xFF; 32];
        codec.stage(&[1u8; 20], &[2u8; 8]);
        assert_eq!(&codec.scratch[..20], &[1u8; 20]);
        assert_eq!(&codec.scratch[20..28], &[2u8; 8]);
        assert_eq!(&codec.scratch[28..], &[0u8; 4]);
    }

    #[test]
    fn random_block_changes_ciphertext_but_not_plaintext() {
        let mut codec = Codec::new();
        let key = [3u8; 32];
        let iv = [4u8; 16];
        let ct1 = codec.seal(&[5u8; 20], &[0u8; 8], &key, &iv);
        let ct2 = codec.seal(&[5u8; 20], &[1u8; 8], &key, &iv);
        // Plaintext fills all of block 0, the random block starts in block 1.
        assert_eq!(ct1.buf[..16], ct2.buf[..16]);
        assert_ne!(ct1.buf[16..], ct2.buf[16..]);
        assert_eq!(codec.open(&ct1, &key), codec.open(&ct2, &key));
    }

    #[test]
    fn debug_omits_scratch() {
        let codec = Codec::new();
        let rendered = format!("{:?}", codec);
        assert!(rendered.contains("plaintext_len: 20"));
        assert!(!rendered.contains("scratch"));
    }

    #[test]
    fn key_from_slice_accepts_exact_length() {
        let key: [u8; 24] = key_from_slice(&[7u8; 24]).unwrap();
        assert_eq!(key, [7u8; 24]);
    }

    #[test]
    fn key_from_slice_rejects_wrong_length() {
        let err = key_from_slice::<32>(&[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidKeyLength {
                expected: 32,
                got: 31
            }
        );
    }
}
