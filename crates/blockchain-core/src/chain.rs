// blockchain-core/src/chain.rs

use crate::{block::BlockIndexEntry, types::*, BlockchainError, BlockchainResult};
use blockchain_crypto::Hash;
use std::collections::HashMap;

/// Read access to already-accepted blocks
pub trait ChainIndex {
    /// Look up an accepted block by hash
    fn entry(&self, hash: &Hash) -> Option<&BlockIndexEntry>;
}

/// In-memory chain index.
///
/// Entries must be inserted in chain order: a block is only accepted once its
/// parent is present, so every stored modifier was derived from a stored one.
#[derive(Debug, Default)]
pub struct MemoryChainIndex {
    /// All entries indexed by hash
    entries: HashMap<Hash, BlockIndexEntry>,
    /// Genesis block hash
    genesis: Option<Hash>,
    /// Highest entry seen
    tip: Option<Hash>,
}

impl MemoryChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new entry
    pub fn insert(&mut self, entry: BlockIndexEntry) -> BlockchainResult<&BlockIndexEntry> {
        if self.entries.contains_key(&entry.hash) {
            return Err(BlockchainError::DuplicateBlock(entry.hash));
        }

        match entry.prev_hash {
            None => {
                if let Some(existing) = self.genesis {
                    return Err(BlockchainError::InvalidChain(format!(
                        "Genesis already set to {}",
                        existing
                    )));
                }
                if entry.height != 0 {
                    return Err(BlockchainError::InvalidBlock(format!(
                        "Genesis must have height 0, got {}",
                        entry.height
                    )));
                }
                self.genesis = Some(entry.hash);
            }
            Some(prev_hash) => {
                let parent = self
                    .entries
                    .get(&prev_hash)
                    .ok_or(BlockchainError::BlockNotFound(prev_hash))?;
                if entry.height != parent.height + 1 {
                    return Err(BlockchainError::InvalidBlock(format!(
                        "Invalid block height: expected {}, got {}",
                        parent.height + 1,
                        entry.height
                    )));
                }
            }
        }

        if self.tip_height().map_or(true, |height| entry.height > height) {
            self.tip = Some(entry.hash);
        }

        tracing::trace!(
            "Indexed block {} at height {} with stake modifier {}",
            entry.hash,
            entry.height,
            entry.stake_modifier
        );

        Ok(self.entries.entry(entry.hash).or_insert(entry))
    }

    pub fn get(&self, hash: &Hash) -> Option<&BlockIndexEntry> {
        self.entries.get(hash)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.entries.contains_key(hash)
    }

    pub fn genesis(&self) -> Option<&BlockIndexEntry> {
        self.genesis.as_ref().and_then(|hash| self.entries.get(hash))
    }

    pub fn tip(&self) -> Option<&BlockIndexEntry> {
        self.tip.as_ref().and_then(|hash| self.entries.get(hash))
    }

    fn tip_height(&self) -> Option<BlockHeight> {
        self.tip().map(|entry| entry.height)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ChainIndex for MemoryChainIndex {
    fn entry(&self, hash: &Hash) -> Option<&BlockIndexEntry> {
        self.get(hash)
    }
}
