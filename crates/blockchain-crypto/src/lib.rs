// blockchain-crypto/src/lib.rs

//! Cryptographic primitives for the proof-of-stake kernel
//!
//! This crate provides:
//! - The 256-bit `Hash` value and the network hash (double SHA-256)
//! - Canonical consensus serialization for hash preimages

pub mod encode;
pub mod hash;

pub use encode::{Encodable, HashWriter};
pub use hash::{double_hash, Hash, Hashable, HASH_SIZE};

/// Result type for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid hash length: expected 32 bytes, got {0}")]
    InvalidHashLength(usize),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_basics() {
        let hash = HashWriter::new().write(&Hash::zero()).finish();
        assert_eq!(hash, double_hash(&[0u8; HASH_SIZE]));
    }
}
