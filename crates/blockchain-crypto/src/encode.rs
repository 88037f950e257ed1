// blockchain-crypto/src/encode.rs

//! Canonical consensus serialization.
//!
//! Every hash preimage on the network is built from the same fixed layouts:
//! 256-bit values as their 32 stored bytes and integers in little-endian
//! order at their declared width. `HashWriter` accumulates such a preimage
//! and finishes it with the network hash.

use crate::hash::{double_hash, Hash};

/// A value with a fixed consensus byte layout
pub trait Encodable {
    /// Append the canonical encoding of `self` to `out`
    fn consensus_encode(&self, out: &mut Vec<u8>);

    /// Canonical encoding as a fresh buffer
    fn consensus_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.consensus_encode(&mut out);
        out
    }
}

impl Encodable for Hash {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl Encodable for u32 {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Encodable for u64 {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Encodable for i64 {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        (**self).consensus_encode(out);
    }
}

/// Builds a hash preimage field by field, in call order
#[derive(Debug, Default, Clone)]
pub struct HashWriter {
    preimage: Vec<u8>,
}

impl HashWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one field
    pub fn write<T: Encodable + ?Sized>(mut self, value: &T) -> Self {
        value.consensus_encode(&mut self.preimage);
        self
    }

    /// Bytes written so far
    pub fn preimage(&self) -> &[u8] {
        &self.preimage
    }

    /// Hash the preimage with the network hash
    pub fn finish(self) -> Hash {
        double_hash(&self.preimage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integer_layouts() {
        assert_eq!(0x0102_0304u32.consensus_bytes(), vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!(1u64.consensus_bytes(), vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!((-1i64).consensus_bytes(), vec![0xff; 8]);
    }

    #[test]
    fn test_hash_is_written_in_stored_order() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xaa;
        let hash = Hash::new(bytes);
        let encoded = hash.consensus_bytes();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[0], 0xaa);
    }

    #[test]
    fn test_writer_concatenates_in_order() {
        let writer = HashWriter::new().write(&1u32).write(&2u32);
        assert_eq!(writer.preimage(), &[1, 0, 0, 0, 2, 0, 0, 0]);

        let swapped = HashWriter::new().write(&2u32).write(&1u32);
        assert_ne!(writer.finish(), swapped.finish());
    }

    #[test]
    fn test_empty_writer_is_double_hash_of_nothing() {
        assert_eq!(HashWriter::new().finish(), double_hash(&[]));
    }

    proptest! {
        #[test]
        fn prop_writer_matches_double_hash(a in any::<u32>(), b in any::<u64>()) {
            let mut buf = Vec::new();
            a.consensus_encode(&mut buf);
            b.consensus_encode(&mut buf);
            let via_writer = HashWriter::new().write(&a).write(&b).finish();
            prop_assert_eq!(via_writer, double_hash(&buf));
        }
    }
}
