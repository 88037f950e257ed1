// blockchain-core/src/types.rs

use blockchain_crypto::{Encodable, Hash};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Block height; genesis is 0
pub type BlockHeight = u64;

/// Protocol-level timestamp in Unix epoch seconds, as compared by
/// consensus rules
pub type Timestamp = i64;

/// Timestamp as carried in block headers and transactions (32 bits on the
/// wire)
pub type TxTime = u32;

/// Base units per coin
pub const COIN: u64 = 100_000_000;

/// Token amount (using BigUint for arbitrary precision)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(BigUint);

impl Amount {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    /// Whole coins expressed in base units
    pub fn from_coins(coins: u64) -> Self {
        Self(BigUint::from(coins) * BigUint::from(COIN))
    }

    pub fn inner(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rolling 256-bit seed chained from genesis through every block.
///
/// Genesis carries the zero modifier. Every other block's modifier is
/// derived from its predecessor's and fixed once the block is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StakeModifier(Hash);

impl StakeModifier {
    pub const fn zero() -> Self {
        Self(Hash::zero())
    }

    pub const fn from_hash(hash: Hash) -> Self {
        Self(hash)
    }

    pub fn as_hash(&self) -> &Hash {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Hash> for StakeModifier {
    fn from(hash: Hash) -> Self {
        Self(hash)
    }
}

impl Encodable for StakeModifier {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.0.consensus_encode(out);
    }
}

impl std::fmt::Display for StakeModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
