//! Fixed-size symmetric encryption of `plaintext || random` with AES-CBC.
//!
//! ```
//! use sym_enc::{padded_len, SymmetricBlockCodec};
//!
//! type Codec = SymmetricBlockCodec<24, 16, 32, { padded_len(24, 16) }>;
//!
//! let mut codec = Codec::new();
//! let key = [0x11u8; 32];
//! let ct = codec.seal(&[0x42; 24], &[0x07; 16], &key, &[0x24; 16]);
//! assert_eq!(ct.buf.len(), 48);
//! assert_eq!(codec.open(&ct, &key), [0x42; 24]);
//! ```
//!
//! No integrity is provided. Callers that need tamper detection must add
//! their own authentication layer.

pub mod cipher;
pub mod ciphertext;
pub mod codec;
pub mod error;
pub mod types;

pub use cipher::{KeyLen, SupportedKeyLen};
pub use ciphertext::Ciphertext;
pub use codec::{key_from_slice, SymmetricBlockCodec};
pub use error::CodecError;
pub use types::{padded_len, BLOCK_SIZE, IV_LEN};
