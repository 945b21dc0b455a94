/// AES block size in bytes. CBC output is always a multiple of this.
pub const BLOCK_SIZE: usize = 16;

/// CBC initialization vector length in bytes (one cipher block).
pub const IV_LEN: usize = BLOCK_SIZE;

/// Ciphertext length for a `plaintext_len`-byte plaintext followed by a
/// `random_len`-byte random block: the sum rounded up to a whole number of
/// AES blocks.
///
/// Used as the `N` parameter of [`crate::SymmetricBlockCodec`]:
///
/// ```
/// use sym_enc::{padded_len, SymmetricBlockCodec};
///
/// type Codec = SymmetricBlockCodec<20, 8, 16, { padded_len(20, 8) }>;
/// assert_eq!(Codec::OUT_LEN, 32);
/// ```
pub const fn padded_len(plaintext_len: usize, random_len: usize) -> usize {
    (plaintext_len + random_len).div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}
