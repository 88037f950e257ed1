// blockchain-core/src/coins.rs

use crate::types::*;
use blockchain_crypto::{Encodable, Hash};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference to a transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction that created the output
    pub hash: Hash,
    /// Output index within that transaction
    pub n: u32,
}

impl OutPoint {
    pub fn new(hash: Hash, n: u32) -> Self {
        Self { hash, n }
    }
}

impl Encodable for OutPoint {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.hash.consensus_encode(out);
        self.n.consensus_encode(out);
    }
}

impl std::fmt::Display for OutPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.hash, self.n)
    }
}

/// The unspent output being staked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSource {
    /// Output value; zero never stakes
    pub amount: Amount,
    /// Timestamp of the transaction that created the output
    pub time: TxTime,
}

impl StakeSource {
    pub fn new(amount: Amount, time: TxTime) -> Self {
        Self { amount, time }
    }
}

/// Read access to the unspent-output set.
///
/// Existence and spentness are the ledger's concern; a returned source is
/// trusted as unspent.
pub trait CoinsView {
    fn stake_source(&self, outpoint: &OutPoint) -> Option<StakeSource>;
}

/// In-memory unspent-output set
#[derive(Debug, Default)]
pub struct MemoryCoinsView {
    coins: HashMap<OutPoint, StakeSource>,
}

impl MemoryCoinsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unspent output, replacing any previous one at the same outpoint
    pub fn add(&mut self, outpoint: OutPoint, source: StakeSource) {
        self.coins.insert(outpoint, source);
    }

    /// Remove an output, returning it if it was unspent
    pub fn spend(&mut self, outpoint: &OutPoint) -> Option<StakeSource> {
        self.coins.remove(outpoint)
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl CoinsView for MemoryCoinsView {
    fn stake_source(&self, outpoint: &OutPoint) -> Option<StakeSource> {
        self.coins.get(outpoint).cloned()
    }
}
