// blockchain-core/src/block.rs
use crate::types::*;
use blockchain_crypto::Hash;
use serde::{Deserialize, Serialize};

/// Chain-index entry for an accepted block.
///
/// Immutable once recorded; the proof-of-stake checks only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIndexEntry {
    /// Block hash
    pub hash: Hash,
    /// Hash of previous block, `None` for genesis
    pub prev_hash: Option<Hash>,
    /// Block height
    pub height: BlockHeight,
    /// Header timestamp
    pub time: TxTime,
    /// Stake modifier computed when the block was connected
    pub stake_modifier: StakeModifier,
}

impl BlockIndexEntry {
    /// Create the genesis entry; its modifier is always zero
    pub fn genesis(hash: Hash, time: TxTime) -> Self {
        Self {
            hash,
            prev_hash: None,
            height: 0,
            time,
            stake_modifier: StakeModifier::zero(),
        }
    }

    /// Create the entry for a block connected on top of `parent`
    pub fn child_of(
        parent: &BlockIndexEntry,
        hash: Hash,
        time: TxTime,
        stake_modifier: StakeModifier,
    ) -> Self {
        Self {
            hash,
            prev_hash: Some(parent.hash),
            height: parent.height + 1,
            time,
            stake_modifier,
        }
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.prev_hash.is_none()
    }
}
