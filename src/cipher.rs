//! Key-length to block-cipher mapping.
//!
//! The codec is parameterized by its key length in bytes. `KeyLen<B>` lifts
//! that number into the type system so only the AES variants have a cipher;
//! any other length fails the `SupportedKeyLen` bound at compile time.

use aes::cipher::consts::U16;
use aes::cipher::{BlockCipher, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};
use aes::{Aes128, Aes192, Aes256};

/// Marker for a key of `B` bytes.
pub struct KeyLen<const B: usize>;

/// Key lengths that have a matching 128-bit block cipher.
pub trait SupportedKeyLen {
    type Cipher: BlockCipher
        + BlockSizeUser<BlockSize = U16>
        + BlockEncrypt
        + BlockDecrypt
        + KeyInit;
}

impl SupportedKeyLen for KeyLen<16> {
    type Cipher = Aes128;
}

impl SupportedKeyLen for KeyLen<24> {
    type Cipher = Aes192;
}

impl SupportedKeyLen for KeyLen<32> {
    type Cipher = Aes256;
}

/// Cipher selected for a `B`-byte key.
pub type CipherFor<const B: usize> = <KeyLen<B> as SupportedKeyLen>::Cipher;
