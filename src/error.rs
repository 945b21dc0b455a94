use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Invalid ciphertext length: expected {expected} bytes, got {got}")]
    InvalidCiphertextLength { expected: usize, got: usize },
}
