//! Ciphertext record produced by the codec.
//!
//! Wire format: `[buf: N bytes][iv: 16 bytes]`, no length prefixes. Both
//! sizes are fixed by the codec parameters.

use crate::error::CodecError;
use crate::types::IV_LEN;

/// CBC output together with the IV it was produced under.
///
/// The IV is part of the ciphertext and must travel with `buf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ciphertext<const N: usize> {
    /// AES-CBC output over `plaintext || random || zero padding`.
    pub buf: [u8; N],
    /// Initialization vector for `buf`.
    pub iv: [u8; IV_LEN],
}

impl<const N: usize> Ciphertext<N> {
    /// Serialized length: ciphertext followed by IV.
    pub const WIRE_LEN: usize = N + IV_LEN;

    pub fn new(buf: [u8; N], iv: [u8; IV_LEN]) -> Self {
        Self { buf, iv }
    }

    /// A zeroed ciphertext carrying `iv`, ready for
    /// [`crate::SymmetricBlockCodec::encrypt_reusing_iv`].
    pub fn with_iv(iv: [u8; IV_LEN]) -> Self {
        Self { buf: [0u8; N], iv }
    }

    /// Serialize as `[buf][iv]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIRE_LEN);
        out.extend_from_slice(&self.buf);
        out.extend_from_slice(&self.iv);
        out
    }

    /// Parse `[buf][iv]`. The input must be exactly `WIRE_LEN` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != Self::WIRE_LEN {
            return Err(CodecError::InvalidCiphertextLength {
                expected: Self::WIRE_LEN,
                got: bytes.len(),
            });
        }

        let (buf_bytes, iv_bytes) = bytes.split_at(N);
        let mut ct = Self::default();
        ct.buf.copy_from_slice(buf_bytes);
        ct.iv.copy_from_slice(iv_bytes);
        Ok(ct)
    }
}

impl<const N: usize> Default for Ciphertext<N> {
    fn default() -> Self {
        Self {
            buf: [0u8; N],
            iv: [0u8; IV_LEN],
        }
    }
}

impl<const N: usize> TryFrom<&[u8]> for Ciphertext<N> {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}
