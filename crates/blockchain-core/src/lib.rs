// blockchain-core/src/lib.rs

//! Chain-side data read by the proof-of-stake kernel
//!
//! This crate provides:
//! - Block index entries and the chain-index read interface
//! - Output references, stake sources and the unspent-output read interface
//! - Amount and stake modifier types

pub mod block;
pub mod chain;
pub mod coins;
pub mod types;

pub use block::BlockIndexEntry;
pub use chain::{ChainIndex, MemoryChainIndex};
pub use coins::{CoinsView, MemoryCoinsView, OutPoint, StakeSource};
pub use types::*;

use blockchain_crypto::Hash;

/// Result type for blockchain operations
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Errors that can occur in blockchain operations
#[derive(Debug, thiserror::Error)]
pub enum BlockchainError {
    #[error("Invalid block: {0}")]
    InvalidBlock(String),

    #[error("Invalid chain: {0}")]
    InvalidChain(String),

    #[error("Block not found: {0}")]
    BlockNotFound(Hash),

    #[error("Block already indexed: {0}")]
    DuplicateBlock(Hash),
}

