// blockchain-crypto/src/hash.rs

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hash output size in bytes
pub const HASH_SIZE: usize = 32;

/// A 32-byte hash value, kept in the byte order the digest produced it
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a new hash from bytes
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a hash from a slice (returns error if wrong length)
    pub fn from_slice(slice: &[u8]) -> crate::CryptoResult<Self> {
        if slice.len() != HASH_SIZE {
            return Err(crate::CryptoError::InvalidHashLength(slice.len()));
        }
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Get the hash as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the hash as a fixed-size array
    pub fn to_bytes(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// The all-zero hash
    pub const fn zero() -> Self {
        Self([0u8; HASH_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Convert to hex string, in stored byte order
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string in stored byte order
    pub fn from_hex(s: &str) -> crate::CryptoResult<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| crate::CryptoError::DeserializationError(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Hex in display order: most significant byte first.
    ///
    /// Hashes are treated as little-endian integers, so block explorers and
    /// RPC print them byte-reversed.
    pub fn to_display_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Parse a display-order hex string
    pub fn from_display_hex(s: &str) -> crate::CryptoResult<Self> {
        let mut hash = Self::from_hex(s)?;
        hash.0.reverse();
        Ok(hash)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = self.to_display_hex();
        write!(f, "Hash({}...{})", &display[..8], &display[56..])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_hex())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

/// Trait for types that can be hashed with single SHA-256
pub trait Hashable {
    fn hash(&self) -> Hash;
}

impl Hashable for [u8] {
    fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self);
        Hash::new(hasher.finalize().into())
    }
}

impl Hashable for Vec<u8> {
    fn hash(&self) -> Hash {
        self.as_slice().hash()
    }
}

/// SHA-256 applied twice. This is the network hash: block ids, transaction
/// ids, stake modifiers and kernel hashes are all computed with it.
pub fn double_hash(data: &[u8]) -> Hash {
    let first = data.hash();
    first.as_bytes().hash()
}
